use std::sync::Arc;

use crate::application::ports::{ItineraryGenerator, JobStore, JobStoreError};
use crate::domain::{Job, JobId, JobOutcome};

/// Owns the job state machine: `processing` transitions exactly once to
/// `completed` or `failed`, and every submitted job reaches a terminal
/// state unless the terminal write itself fails.
#[derive(Clone)]
pub struct JobService {
    job_store: Arc<dyn JobStore>,
    generator: Arc<dyn ItineraryGenerator>,
}

impl JobService {
    pub fn new(job_store: Arc<dyn JobStore>, generator: Arc<dyn ItineraryGenerator>) -> Self {
        Self {
            job_store,
            generator,
        }
    }

    /// Validates the request, persists the initial `processing` document,
    /// and detaches generation as a background task. Returns as soon as
    /// the initial write is durable, so the job is immediately pollable.
    pub async fn submit(&self, destination: &str, duration_days: u32) -> Result<JobId, SubmitError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(SubmitError::InvalidInput(
                "destination must be a non-empty string",
            ));
        }
        if duration_days < 1 {
            return Err(SubmitError::InvalidInput(
                "durationDays must be an integer >= 1",
            ));
        }

        let job = Job::new(destination.to_string(), duration_days);
        let job_id = job.id;

        self.job_store.create(&job).await.map_err(SubmitError::Store)?;

        tracing::info!(
            job_id = %job_id,
            destination = %job.destination,
            duration_days = duration_days,
            "Itinerary job created"
        );

        let service = self.clone();
        tokio::spawn(async move {
            service.run(job_id, &job.destination, duration_days).await;
        });

        Ok(job_id)
    }

    /// Background half of the lifecycle: resolve generation into exactly
    /// one terminal write.
    #[tracing::instrument(skip(self), fields(job_id = %job_id))]
    pub async fn run(&self, job_id: JobId, destination: &str, duration_days: u32) {
        if let Err(message) = self.generate_and_complete(job_id, destination, duration_days).await
        {
            let outcome = JobOutcome::Failed { message };
            if let Err(e) = self.job_store.patch_terminal(job_id, &outcome).await {
                // Best-effort: with no terminal state recorded, the job
                // stays `processing` until repaired by hand.
                tracing::error!(
                    error = %e,
                    job_id = %job_id,
                    "Terminal status write failed, job stuck in processing"
                );
            }
        }
    }

    async fn generate_and_complete(
        &self,
        job_id: JobId,
        destination: &str,
        duration_days: u32,
    ) -> Result<(), String> {
        let itinerary = self
            .generator
            .generate(destination, duration_days)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Itinerary generation failed");
                e.to_string()
            })?;

        tracing::info!(days = itinerary.len(), "Itinerary generated");

        self.job_store
            .patch_terminal(job_id, &JobOutcome::Completed { itinerary })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Completed status write failed");
                e.to_string()
            })
    }

    pub async fn status(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError> {
        self.job_store.fetch(job_id).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("failed to create job: {0}")]
    Store(JobStoreError),
}
