//! Encode/decode boundary for the document store's typed-value wrapper
//! convention (stringValue / integerValue / timestampValue / nullValue /
//! arrayValue / mapValue). Nothing outside this module speaks that
//! dialect; the rest of the crate works with plain domain structures.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::domain::{Activity, DayPlan, Job, JobId, JobOutcome, JobStatus, TimeSlot};

/// Field paths overwritten by a terminal patch, for the store's update
/// mask.
pub const TERMINAL_FIELD_PATHS: [&str; 4] = ["status", "itinerary", "error", "completedAt"];

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(pub String);

/// Full field map for the initial document write.
pub fn encode_job(job: &Job) -> Value {
    let mut fields = Map::new();
    fields.insert("jobId".to_string(), string_value(&job.id.to_string()));
    fields.insert("status".to_string(), string_value(job.status.as_str()));
    fields.insert("destination".to_string(), string_value(&job.destination));
    fields.insert(
        "durationDays".to_string(),
        integer_value(job.duration_days as i64),
    );
    fields.insert("createdAt".to_string(), timestamp_value(&job.created_at));
    fields.insert(
        "completedAt".to_string(),
        match &job.completed_at {
            Some(t) => timestamp_value(t),
            None => null_value(),
        },
    );
    fields.insert("itinerary".to_string(), encode_itinerary(&job.itinerary));
    fields.insert(
        "error".to_string(),
        match &job.error_message {
            Some(msg) => string_value(msg),
            None => null_value(),
        },
    );
    json!({ "fields": fields })
}

/// Field map for the terminal patch. Paired with [`TERMINAL_FIELD_PATHS`]
/// so only the lifecycle fields are overwritten.
pub fn encode_terminal(outcome: &JobOutcome, completed_at: &DateTime<Utc>) -> Value {
    let mut fields = Map::new();
    fields.insert(
        "status".to_string(),
        string_value(outcome.status().as_str()),
    );
    fields.insert("completedAt".to_string(), timestamp_value(completed_at));
    match outcome {
        JobOutcome::Completed { itinerary } => {
            fields.insert("itinerary".to_string(), encode_itinerary(itinerary));
            fields.insert("error".to_string(), null_value());
        }
        JobOutcome::Failed { message } => {
            fields.insert("itinerary".to_string(), encode_itinerary(&[]));
            fields.insert("error".to_string(), string_value(message));
        }
    }
    json!({ "fields": fields })
}

pub fn decode_job(document: &Value) -> Result<Job, DecodeError> {
    let fields = document
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError("document has no fields".to_string()))?;

    let id = decode_job_id(document, fields)?;

    let status = decode_string(fields, "status")?
        .parse::<JobStatus>()
        .map_err(DecodeError)?;
    let destination = decode_string(fields, "destination")?;
    let duration_days = decode_integer(fields, "durationDays")? as u32;
    let created_at = decode_timestamp(fields, "createdAt")?
        .ok_or_else(|| DecodeError("createdAt is missing".to_string()))?;
    let completed_at = decode_timestamp(fields, "completedAt")?;
    let itinerary = decode_itinerary(fields)?;
    let error_message = decode_optional_string(fields, "error");

    Ok(Job {
        id,
        status,
        destination,
        duration_days,
        created_at,
        completed_at,
        itinerary,
        error_message,
    })
}

fn decode_job_id(document: &Value, fields: &Map<String, Value>) -> Result<JobId, DecodeError> {
    // Prefer the explicit field; fall back to the document resource name.
    let raw = decode_optional_string(fields, "jobId").or_else(|| {
        document
            .get("name")
            .and_then(Value::as_str)
            .and_then(|name| name.rsplit('/').next())
            .map(String::from)
    });

    let raw = raw.ok_or_else(|| DecodeError("document carries no job id".to_string()))?;
    let uuid = Uuid::parse_str(&raw)
        .map_err(|e| DecodeError(format!("invalid job id {}: {}", raw, e)))?;
    Ok(JobId::from_uuid(uuid))
}

fn encode_itinerary(itinerary: &[DayPlan]) -> Value {
    let days = itinerary.iter().map(encode_day).collect::<Vec<_>>();
    array_value(days)
}

fn encode_day(day: &DayPlan) -> Value {
    let mut fields = Map::new();
    fields.insert("day".to_string(), integer_value(day.day as i64));
    fields.insert("theme".to_string(), string_value(&day.theme));
    let activities = day.activities.iter().map(encode_activity).collect();
    fields.insert("activities".to_string(), array_value(activities));
    map_value(fields)
}

fn encode_activity(activity: &Activity) -> Value {
    let mut fields = Map::new();
    fields.insert("time".to_string(), string_value(activity.time.as_str()));
    fields.insert(
        "description".to_string(),
        string_value(&activity.description),
    );
    fields.insert("location".to_string(), string_value(&activity.location));
    map_value(fields)
}

fn decode_itinerary(fields: &Map<String, Value>) -> Result<Vec<DayPlan>, DecodeError> {
    let Some(values) = array_values(fields.get("itinerary")) else {
        return Ok(Vec::new());
    };
    values.iter().map(decode_day).collect()
}

fn decode_day(value: &Value) -> Result<DayPlan, DecodeError> {
    let fields = map_fields(value)
        .ok_or_else(|| DecodeError("itinerary entry is not a map".to_string()))?;

    let day = decode_integer(fields, "day")? as u32;
    let theme = decode_string(fields, "theme")?;
    let activities = array_values(fields.get("activities"))
        .map(|values| values.iter().map(decode_activity).collect())
        .transpose()?
        .unwrap_or_default();

    Ok(DayPlan {
        day,
        theme,
        activities,
    })
}

fn decode_activity(value: &Value) -> Result<Activity, DecodeError> {
    let fields =
        map_fields(value).ok_or_else(|| DecodeError("activity is not a map".to_string()))?;

    let time = TimeSlot::from_str(&decode_string(fields, "time")?).map_err(DecodeError)?;
    let description = decode_string(fields, "description")?;
    let location = decode_string(fields, "location")?;

    Ok(Activity {
        time,
        description,
        location,
    })
}

fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

// Integers ride the wire as decimal strings.
fn integer_value(i: i64) -> Value {
    json!({ "integerValue": i.to_string() })
}

fn timestamp_value(t: &DateTime<Utc>) -> Value {
    json!({ "timestampValue": t.to_rfc3339() })
}

fn null_value() -> Value {
    json!({ "nullValue": null })
}

fn array_value(values: Vec<Value>) -> Value {
    json!({ "arrayValue": { "values": values } })
}

fn map_value(fields: Map<String, Value>) -> Value {
    json!({ "mapValue": { "fields": fields } })
}

fn decode_string(fields: &Map<String, Value>, name: &str) -> Result<String, DecodeError> {
    decode_optional_string(fields, name)
        .ok_or_else(|| DecodeError(format!("{} is missing or not a string", name)))
}

fn decode_optional_string(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)?
        .get("stringValue")?
        .as_str()
        .map(String::from)
}

fn decode_integer(fields: &Map<String, Value>, name: &str) -> Result<i64, DecodeError> {
    let value = fields
        .get(name)
        .and_then(|f| f.get("integerValue"))
        .ok_or_else(|| DecodeError(format!("{} is missing or not an integer", name)))?;

    // Tolerate both the string convention and a bare JSON number.
    match value {
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|e| DecodeError(format!("{} is not a valid integer: {}", name, e))),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| DecodeError(format!("{} is out of range", name))),
        _ => Err(DecodeError(format!("{} is not an integer", name))),
    }
}

fn decode_timestamp(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<DateTime<Utc>>, DecodeError> {
    let Some(field) = fields.get(name) else {
        return Ok(None);
    };
    let Some(raw) = field.get("timestampValue").and_then(Value::as_str) else {
        // Absent or nullValue both read as "not set".
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|e| DecodeError(format!("{} is not a valid timestamp: {}", name, e)))
}

fn array_values(field: Option<&Value>) -> Option<&Vec<Value>> {
    field?.get("arrayValue")?.get("values")?.as_array()
}

fn map_fields(value: &Value) -> Option<&Map<String, Value>> {
    value.get("mapValue")?.get("fields")?.as_object()
}
