use crate::infrastructure::persistence::FIRESTORE_BASE_URL;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub firestore: FirestoreSettings,
    pub service_account: ServiceAccountSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct FirestoreSettings {
    pub project_id: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ServiceAccountSettings {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

impl Settings {
    /// Reads the full configuration from the environment. Missing
    /// required variables fail startup rather than the first request.
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| SettingsError::Invalid("SERVER_PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            server: ServerSettings {
                host: optional("SERVER_HOST", "0.0.0.0"),
                port,
            },
            llm: LlmSettings {
                api_key: required("OPENAI_API_KEY")?,
                base_url: optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                model: optional("OPENAI_MODEL", DEFAULT_MODEL),
            },
            firestore: FirestoreSettings {
                project_id: required("FIRESTORE_PROJECT_ID")?,
                base_url: optional("FIRESTORE_BASE_URL", FIRESTORE_BASE_URL),
            },
            service_account: ServiceAccountSettings {
                client_email: required("SERVICE_ACCOUNT_EMAIL")?,
                private_key: normalize_private_key(&required("SERVICE_ACCOUNT_PRIVATE_KEY")?),
                token_uri: optional("TOKEN_URI", DEFAULT_TOKEN_URI),
            },
        })
    }
}

/// Deployment tooling hands the key over with literal `\n` escapes; the
/// signer needs real newlines.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
