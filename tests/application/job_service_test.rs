use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use itinera::application::ports::{JobStore, JobStoreError};
use itinera::application::services::{JobService, SubmitError};
use itinera::domain::{Job, JobId, JobOutcome, JobStatus};
use itinera::infrastructure::llm::MockItineraryGenerator;
use itinera::infrastructure::persistence::InMemoryJobStore;

/// Store whose terminal write always fails, signalling each attempt.
struct FailingPatchStore {
    inner: InMemoryJobStore,
    attempts: mpsc::UnboundedSender<()>,
}

impl FailingPatchStore {
    fn new() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (attempts, receiver) = mpsc::unbounded_channel();
        (
            Self {
                inner: InMemoryJobStore::new(),
                attempts,
            },
            receiver,
        )
    }
}

#[async_trait::async_trait]
impl JobStore for FailingPatchStore {
    async fn create(&self, job: &Job) -> Result<(), JobStoreError> {
        self.inner.create(job).await
    }

    async fn patch_terminal(&self, _id: JobId, _outcome: &JobOutcome) -> Result<(), JobStoreError> {
        let _ = self.attempts.send(());
        Err(JobStoreError::RequestFailed("store is down".to_string()))
    }

    async fn fetch(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        self.inner.fetch(id).await
    }
}

/// Store that refuses the initial write.
struct FailingCreateStore;

#[async_trait::async_trait]
impl JobStore for FailingCreateStore {
    async fn create(&self, _job: &Job) -> Result<(), JobStoreError> {
        Err(JobStoreError::RequestFailed("store is down".to_string()))
    }

    async fn patch_terminal(&self, _id: JobId, _outcome: &JobOutcome) -> Result<(), JobStoreError> {
        Ok(())
    }

    async fn fetch(&self, _id: JobId) -> Result<Option<Job>, JobStoreError> {
        Ok(None)
    }
}

#[tokio::test]
async fn given_blank_destination_when_submitting_then_input_is_rejected() {
    let store = Arc::new(InMemoryJobStore::new());
    let service = JobService::new(Arc::clone(&store) as Arc<dyn JobStore>, Arc::new(MockItineraryGenerator));

    let result = service.submit("   ", 3).await;

    assert!(matches!(result, Err(SubmitError::InvalidInput(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_zero_duration_when_submitting_then_input_is_rejected() {
    let store = Arc::new(InMemoryJobStore::new());
    let service = JobService::new(Arc::clone(&store) as Arc<dyn JobStore>, Arc::new(MockItineraryGenerator));

    let result = service.submit("Lisbon", 0).await;

    assert!(matches!(result, Err(SubmitError::InvalidInput(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_failing_initial_write_when_submitting_then_error_propagates() {
    let service = JobService::new(Arc::new(FailingCreateStore), Arc::new(MockItineraryGenerator));

    let result = service.submit("Lisbon", 3).await;

    assert!(matches!(result, Err(SubmitError::Store(_))));
}

#[tokio::test]
async fn given_failing_terminal_write_when_generation_finishes_then_job_stays_processing() {
    let (store, mut attempts) = FailingPatchStore::new();
    let store = Arc::new(store);
    let service = JobService::new(
        Arc::clone(&store) as Arc<dyn JobStore>,
        Arc::new(MockItineraryGenerator),
    );

    let job_id = service.submit("Lisbon", 2).await.unwrap();

    // Wait for both terminal attempts: the completed write and the
    // fallback failed write.
    tokio::time::timeout(Duration::from_secs(1), attempts.recv())
        .await
        .expect("terminal write never attempted");
    tokio::time::timeout(Duration::from_secs(1), attempts.recv())
        .await
        .expect("fallback terminal write never attempted");

    let job = service.status(job_id).await.unwrap().expect("job exists");
    assert_eq!(job.status, JobStatus::Processing);
    assert!(job.itinerary.is_empty());
    assert!(job.error_message.is_none());
}

#[tokio::test]
async fn given_successful_generation_when_running_then_job_completes_once() {
    let store = Arc::new(InMemoryJobStore::new());
    let service = JobService::new(
        Arc::clone(&store) as Arc<dyn JobStore>,
        Arc::new(MockItineraryGenerator),
    );

    let job_id = service.submit("Lisbon", 2).await.unwrap();

    let mut job = None;
    for _ in 0..200 {
        let snapshot = service.status(job_id).await.unwrap().expect("job exists");
        if snapshot.status.is_terminal() {
            job = Some(snapshot);
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let job = job.expect("job never reached a terminal state");
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.itinerary.len(), 2);
    assert!(job.completed_at.is_some());
    assert!(job.error_message.is_none());
}
