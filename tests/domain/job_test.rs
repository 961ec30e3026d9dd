use itinera::domain::{Job, JobId, JobOutcome, JobStatus};

#[test]
fn given_new_job_then_it_starts_processing_with_empty_lifecycle_fields() {
    let job = Job::new("Lisbon".to_string(), 3);

    assert_eq!(job.status, JobStatus::Processing);
    assert_eq!(job.destination, "Lisbon");
    assert_eq!(job.duration_days, 3);
    assert!(job.itinerary.is_empty());
    assert!(job.error_message.is_none());
    assert!(job.completed_at.is_none());
}

#[test]
fn given_two_jobs_then_their_ids_differ() {
    let first = Job::new("Lisbon".to_string(), 1);
    let second = Job::new("Lisbon".to_string(), 1);

    assert_ne!(first.id, second.id);
}

#[test]
fn given_job_id_then_display_round_trips_through_uuid() {
    let id = JobId::new();
    let uuid = id.as_uuid();

    assert_eq!(id.to_string(), uuid.to_string());
    assert_eq!(JobId::from_uuid(uuid), id);
}

#[test]
fn given_outcomes_then_statuses_are_terminal() {
    let completed = JobOutcome::Completed {
        itinerary: Vec::new(),
    };
    let failed = JobOutcome::Failed {
        message: "provider unavailable".to_string(),
    };

    assert_eq!(completed.status(), JobStatus::Completed);
    assert_eq!(failed.status(), JobStatus::Failed);
    assert!(completed.status().is_terminal());
    assert!(failed.status().is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
}

#[test]
fn given_status_strings_then_parsing_round_trips() {
    for status in [JobStatus::Processing, JobStatus::Completed, JobStatus::Failed] {
        assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
    }

    assert!("PROCESSING".parse::<JobStatus>().is_err());
    assert!("done".parse::<JobStatus>().is_err());
}
