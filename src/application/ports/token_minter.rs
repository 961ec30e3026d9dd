use std::fmt;

use async_trait::async_trait;

/// Short-lived credential authorizing document-store operations.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

// The secret must never end up in logs or error text.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[async_trait]
pub trait TokenMinter: Send + Sync {
    /// Produces a fresh bearer token scoped to the document-store
    /// capability. Failures propagate; callers decide whether to retry.
    async fn mint(&self) -> Result<BearerToken, TokenMintError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenMintError {
    #[error("assertion signing failed: {0}")]
    Signing(String),
    #[error("token exchange failed: {0}")]
    Exchange(String),
    #[error("token endpoint rejected assertion: {0}")]
    Rejected(String),
}
