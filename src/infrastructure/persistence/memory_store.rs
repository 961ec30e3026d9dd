use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::ports::{JobStore, JobStoreError};
use crate::domain::{Job, JobId, JobOutcome};

/// In-memory job store for tests and offline runs.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job: &Job) -> Result<(), JobStoreError> {
        self.jobs.lock().await.insert(job.id, job.clone());
        Ok(())
    }

    async fn patch_terminal(&self, id: JobId, outcome: &JobOutcome) -> Result<(), JobStoreError> {
        let mut jobs = self.jobs.lock().await;
        let job = jobs.get_mut(&id).ok_or_else(|| {
            JobStoreError::RequestFailed(format!("no document for job {}", id))
        })?;

        job.status = outcome.status();
        job.completed_at = Some(Utc::now());
        match outcome {
            JobOutcome::Completed { itinerary } => {
                job.itinerary = itinerary.clone();
                job.error_message = None;
            }
            JobOutcome::Failed { message } => {
                job.itinerary = Vec::new();
                job.error_message = Some(message.clone());
            }
        }
        Ok(())
    }

    async fn fetch(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        Ok(self.jobs.lock().await.get(&id).cloned())
    }
}
