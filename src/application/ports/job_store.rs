use async_trait::async_trait;

use crate::domain::{Job, JobId, JobOutcome};

/// Persistence boundary for job documents. One document per job, keyed by
/// the job id; every write is an idempotent overwrite of that document.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Writes the initial document for a freshly submitted job. The job
    /// must be readable as soon as this returns.
    async fn create(&self, job: &Job) -> Result<(), JobStoreError>;

    /// Overwrites the status/itinerary/error/completion fields of an
    /// existing document with the job's terminal resolution.
    async fn patch_terminal(&self, id: JobId, outcome: &JobOutcome) -> Result<(), JobStoreError>;

    /// Fetches the current snapshot. An unknown id is `Ok(None)`, distinct
    /// from transport or decode failures.
    async fn fetch(&self, id: JobId) -> Result<Option<Job>, JobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("store authorization failed: {0}")]
    Unauthorized(String),
    #[error("store request failed: {0}")]
    RequestFailed(String),
    #[error("document decode failed: {0}")]
    Decode(String),
}
