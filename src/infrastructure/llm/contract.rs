use std::str::FromStr;

use serde::Deserialize;

use crate::application::ports::GenerationError;
use crate::domain::{ACTIVITIES_PER_DAY, Activity, DayPlan, TimeSlot};

#[derive(Deserialize)]
struct ItineraryPayload {
    itinerary: Vec<DayPayload>,
}

#[derive(Deserialize)]
struct DayPayload {
    day: i64,
    theme: String,
    activities: Vec<ActivityPayload>,
}

#[derive(Deserialize)]
struct ActivityPayload {
    time: String,
    description: String,
    location: String,
}

/// Parse-then-validate boundary for untrusted model output. Parsing
/// failures and contract violations are distinct error kinds so the job
/// record can say which one happened.
pub fn parse_itinerary(raw: &str, expected_days: u32) -> Result<Vec<DayPlan>, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        GenerationError::MalformedOutput(format!("model output is not valid JSON: {}", e))
    })?;

    let payload: ItineraryPayload = serde_json::from_value(value)
        .map_err(|e| GenerationError::SchemaViolation(e.to_string()))?;

    if payload.itinerary.len() != expected_days as usize {
        return Err(GenerationError::SchemaViolation(format!(
            "expected {} days, model produced {}",
            expected_days,
            payload.itinerary.len()
        )));
    }

    payload.itinerary.into_iter().map(validate_day).collect()
}

fn validate_day(day: DayPayload) -> Result<DayPlan, GenerationError> {
    if day.day < 1 {
        return Err(GenerationError::SchemaViolation(format!(
            "day number {} must be >= 1",
            day.day
        )));
    }
    if day.theme.trim().is_empty() {
        return Err(GenerationError::SchemaViolation(format!(
            "day {} has an empty theme",
            day.day
        )));
    }
    if day.activities.len() != ACTIVITIES_PER_DAY {
        return Err(GenerationError::SchemaViolation(format!(
            "day {} has {} activities, expected exactly {}",
            day.day,
            day.activities.len(),
            ACTIVITIES_PER_DAY
        )));
    }

    let activities = day
        .activities
        .into_iter()
        .map(|a| validate_activity(day.day, a))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DayPlan {
        day: day.day as u32,
        theme: day.theme,
        activities,
    })
}

fn validate_activity(day: i64, activity: ActivityPayload) -> Result<Activity, GenerationError> {
    let time = TimeSlot::from_str(&activity.time).map_err(|e| {
        GenerationError::SchemaViolation(format!("day {}: {}", day, e))
    })?;
    if activity.description.trim().is_empty() {
        return Err(GenerationError::SchemaViolation(format!(
            "day {}: activity description is empty",
            day
        )));
    }
    if activity.location.trim().is_empty() {
        return Err(GenerationError::SchemaViolation(format!(
            "day {}: activity location is empty",
            day
        )));
    }

    Ok(Activity {
        time,
        description: activity.description,
        location: activity.location,
    })
}
