use chrono::Utc;
use serde_json::json;

use itinera::domain::{Activity, DayPlan, Job, JobOutcome, JobStatus, TimeSlot};
use itinera::infrastructure::persistence::wire::{
    TERMINAL_FIELD_PATHS, decode_job, encode_job, encode_terminal,
};

fn sample_day(day: u32, theme: &str) -> DayPlan {
    DayPlan {
        day,
        theme: theme.to_string(),
        activities: vec![
            Activity {
                time: TimeSlot::Morning,
                description: "Castle walk".to_string(),
                location: "Castle hill".to_string(),
            },
            Activity {
                time: TimeSlot::Afternoon,
                description: "City museum".to_string(),
                location: "Main square".to_string(),
            },
            Activity {
                time: TimeSlot::Evening,
                description: "Fado night".to_string(),
                location: "Alfama".to_string(),
            },
        ],
    }
}

#[test]
fn given_fresh_job_then_encoding_uses_typed_wrappers() {
    let job = Job::new("Lisbon".to_string(), 3);
    let document = encode_job(&job);
    let fields = &document["fields"];

    assert_eq!(fields["jobId"]["stringValue"], job.id.to_string());
    assert_eq!(fields["status"]["stringValue"], "processing");
    assert_eq!(fields["destination"]["stringValue"], "Lisbon");
    // Integers ride the wire as decimal strings.
    assert_eq!(fields["durationDays"]["integerValue"], "3");
    assert!(fields["createdAt"]["timestampValue"].is_string());
    assert!(fields["completedAt"]["nullValue"].is_null());
    assert!(fields["error"]["nullValue"].is_null());
    assert_eq!(
        fields["itinerary"]["arrayValue"]["values"]
            .as_array()
            .unwrap()
            .len(),
        0
    );
}

#[test]
fn given_completed_job_then_encode_decode_round_trips_in_order() {
    let mut job = Job::new("Lisbon".to_string(), 2);
    job.status = JobStatus::Completed;
    job.completed_at = Some(Utc::now());
    job.itinerary = vec![sample_day(1, "Old town"), sample_day(2, "Coast")];

    let decoded = decode_job(&encode_job(&job)).unwrap();

    assert_eq!(decoded, job);
    assert_eq!(decoded.itinerary[0].theme, "Old town");
    assert_eq!(decoded.itinerary[1].theme, "Coast");
}

#[test]
fn given_terminal_completion_then_patch_fields_match_the_update_mask() {
    let outcome = JobOutcome::Completed {
        itinerary: vec![sample_day(1, "Old town")],
    };
    let patch = encode_terminal(&outcome, &Utc::now());
    let fields = patch["fields"].as_object().unwrap();

    assert_eq!(fields.len(), TERMINAL_FIELD_PATHS.len());
    for path in TERMINAL_FIELD_PATHS {
        assert!(fields.contains_key(path), "missing field {}", path);
    }
    assert_eq!(fields["status"]["stringValue"], "completed");
    assert!(fields["error"]["nullValue"].is_null());
}

#[test]
fn given_terminal_failure_then_error_is_set_and_itinerary_empty() {
    let outcome = JobOutcome::Failed {
        message: "provider unavailable: rate limited".to_string(),
    };
    let patch = encode_terminal(&outcome, &Utc::now());
    let fields = &patch["fields"];

    assert_eq!(fields["status"]["stringValue"], "failed");
    assert_eq!(
        fields["error"]["stringValue"],
        "provider unavailable: rate limited"
    );
    assert_eq!(
        fields["itinerary"]["arrayValue"]["values"]
            .as_array()
            .unwrap()
            .len(),
        0
    );
}

#[test]
fn given_document_without_optional_fields_then_decoding_tolerates_absence() {
    let job_id = uuid::Uuid::new_v4();
    let document = json!({
        "fields": {
            "jobId": {"stringValue": job_id.to_string()},
            "status": {"stringValue": "processing"},
            "destination": {"stringValue": "Lisbon"},
            "durationDays": {"integerValue": "3"},
            "createdAt": {"timestampValue": "2026-08-07T09:00:00Z"}
        }
    });

    let job = decode_job(&document).unwrap();

    assert_eq!(job.id.as_uuid(), job_id);
    assert!(job.completed_at.is_none());
    assert!(job.error_message.is_none());
    assert!(job.itinerary.is_empty());
}

#[test]
fn given_document_without_job_id_field_then_id_comes_from_the_resource_name() {
    let job_id = uuid::Uuid::new_v4();
    let document = json!({
        "name": format!(
            "projects/demo/databases/(default)/documents/itineraries/{}",
            job_id
        ),
        "fields": {
            "status": {"stringValue": "processing"},
            "destination": {"stringValue": "Lisbon"},
            "durationDays": {"integerValue": "3"},
            "createdAt": {"timestampValue": "2026-08-07T09:00:00Z"}
        }
    });

    let job = decode_job(&document).unwrap();
    assert_eq!(job.id.as_uuid(), job_id);
}

#[test]
fn given_bare_number_integer_then_decoding_still_accepts_it() {
    let document = json!({
        "fields": {
            "jobId": {"stringValue": uuid::Uuid::new_v4().to_string()},
            "status": {"stringValue": "processing"},
            "destination": {"stringValue": "Lisbon"},
            "durationDays": {"integerValue": 3},
            "createdAt": {"timestampValue": "2026-08-07T09:00:00Z"}
        }
    });

    assert_eq!(decode_job(&document).unwrap().duration_days, 3);
}

#[test]
fn given_document_without_fields_then_decoding_fails() {
    assert!(decode_job(&json!({})).is_err());
    assert!(decode_job(&json!({"fields": {}})).is_err());
}
