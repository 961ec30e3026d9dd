use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DayPlan, JobStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One itinerary-generation request and its lifecycle record.
///
/// `itinerary` is non-empty only once the job is `Completed`;
/// `error_message` is set only once the job is `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub destination: String,
    pub duration_days: u32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub itinerary: Vec<DayPlan>,
    pub error_message: Option<String>,
}

impl Job {
    pub fn new(destination: String, duration_days: u32) -> Self {
        Self {
            id: JobId::new(),
            status: JobStatus::Processing,
            destination,
            duration_days,
            created_at: Utc::now(),
            completed_at: None,
            itinerary: Vec::new(),
            error_message: None,
        }
    }
}

/// Terminal resolution of a job. Carrying the itinerary and the error
/// message in separate variants keeps the completed/failed exclusivity
/// invariant out of reach of callers.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed { itinerary: Vec<DayPlan> },
    Failed { message: String },
}

impl JobOutcome {
    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Completed { .. } => JobStatus::Completed,
            JobOutcome::Failed { .. } => JobStatus::Failed,
        }
    }
}
