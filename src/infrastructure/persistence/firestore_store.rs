use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

use crate::application::ports::{BearerToken, JobStore, JobStoreError, TokenMinter};
use crate::domain::{Job, JobId, JobOutcome};
use crate::infrastructure::persistence::wire;

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// All jobs live in one fixed collection, keyed by job id.
pub const JOBS_COLLECTION: &str = "itineraries";

/// Job store over the document REST API. Every operation mints a fresh
/// bearer token; calls are infrequent enough that caching is not worth
/// the invalidation handling.
pub struct FirestoreJobStore {
    client: Client,
    minter: Arc<dyn TokenMinter>,
    base_url: String,
    project_id: String,
}

impl FirestoreJobStore {
    pub fn new(minter: Arc<dyn TokenMinter>, project_id: String) -> Self {
        Self::with_base_url(minter, project_id, FIRESTORE_BASE_URL.to_string())
    }

    pub fn with_base_url(
        minter: Arc<dyn TokenMinter>,
        project_id: String,
        base_url: String,
    ) -> Self {
        Self {
            client: Client::new(),
            minter,
            base_url,
            project_id,
        }
    }

    fn document_url(&self, id: JobId) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            self.base_url, self.project_id, JOBS_COLLECTION, id
        )
    }

    async fn authorize(&self) -> Result<BearerToken, JobStoreError> {
        self.minter
            .mint()
            .await
            .map_err(|e| JobStoreError::Unauthorized(e.to_string()))
    }

    async fn reject(response: reqwest::Response) -> JobStoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            JobStoreError::Unauthorized(format!("HTTP {}: {}", status, body))
        } else {
            JobStoreError::RequestFailed(format!("HTTP {}: {}", status, body))
        }
    }
}

#[async_trait]
impl JobStore for FirestoreJobStore {
    #[tracing::instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &Job) -> Result<(), JobStoreError> {
        let token = self.authorize().await?;
        let body = wire::encode_job(job);

        // PATCH on the document path creates or overwrites the whole
        // document, which keeps the write idempotent.
        let response = self
            .client
            .patch(self.document_url(job.id))
            .bearer_auth(token.secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| JobStoreError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        tracing::debug!("Job document created");
        Ok(())
    }

    #[tracing::instrument(skip(self, outcome), fields(job_id = %id, status = %outcome.status()))]
    async fn patch_terminal(&self, id: JobId, outcome: &JobOutcome) -> Result<(), JobStoreError> {
        let token = self.authorize().await?;
        let completed_at = Utc::now();
        let body = wire::encode_terminal(outcome, &completed_at);

        let mask: Vec<(&str, &str)> = wire::TERMINAL_FIELD_PATHS
            .iter()
            .map(|path| ("updateMask.fieldPaths", *path))
            .collect();

        let response = self
            .client
            .patch(self.document_url(id))
            .query(&mask)
            .bearer_auth(token.secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| JobStoreError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        tracing::debug!("Terminal status written");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(job_id = %id))]
    async fn fetch(&self, id: JobId) -> Result<Option<Job>, JobStoreError> {
        let token = self.authorize().await?;

        let response = self
            .client
            .get(self.document_url(id))
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| JobStoreError::RequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let document: serde_json::Value = response
            .json()
            .await
            .map_err(|e| JobStoreError::Decode(e.to_string()))?;

        wire::decode_job(&document)
            .map(Some)
            .map_err(|e| JobStoreError::Decode(e.to_string()))
    }
}
