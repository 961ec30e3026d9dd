mod settings;

pub use settings::{
    FirestoreSettings, LlmSettings, ServerSettings, ServiceAccountSettings, Settings,
    SettingsError, normalize_private_key,
};
