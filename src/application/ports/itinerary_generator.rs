use async_trait::async_trait;

use crate::domain::DayPlan;

#[async_trait]
pub trait ItineraryGenerator: Send + Sync {
    async fn generate(
        &self,
        destination: &str,
        duration_days: u32,
    ) -> Result<Vec<DayPlan>, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The provider returned text that is not parseable JSON.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
    /// The output parsed as JSON but violates the itinerary contract.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
    /// Transient provider failures persisted through every retry attempt.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// The provider rejected the request outright (auth, bad request);
    /// not eligible for retry.
    #[error("provider rejected request: {0}")]
    RequestRejected(String),
}
