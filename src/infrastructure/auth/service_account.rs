use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{BearerToken, TokenMintError, TokenMinter};

/// Capability requested for every minted token: read/write access to the
/// document store.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Exchanges a self-signed service-account assertion for a bearer token
/// at the identity provider's token endpoint.
pub struct ServiceAccountMinter {
    client: Client,
    client_email: String,
    private_key: String,
    token_uri: String,
    scope: String,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountMinter {
    pub fn new(client_email: String, private_key: String, token_uri: String) -> Self {
        Self {
            client: Client::new(),
            client_email,
            private_key,
            token_uri,
            scope: DATASTORE_SCOPE.to_string(),
        }
    }

    /// Builds and signs the RS256 JWT assertion presented to the token
    /// endpoint. Exposed separately so the claim shape is testable
    /// without a live exchange.
    pub fn build_assertion(&self) -> Result<String, TokenMintError> {
        let issued_at = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: &self.scope,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| TokenMintError::Signing(format!("invalid private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| TokenMintError::Signing(e.to_string()))
    }
}

#[async_trait]
impl TokenMinter for ServiceAccountMinter {
    #[tracing::instrument(skip(self))]
    async fn mint(&self) -> Result<BearerToken, TokenMintError> {
        let assertion = self.build_assertion()?;

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokenMintError::Exchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TokenMintError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenMintError::Exchange(e.to_string()))?;

        Ok(BearerToken::new(token.access_token))
    }
}
