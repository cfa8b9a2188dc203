use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// The value is deliberately left out so secrets never end up in logs.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Settings injection is only supported in a sandboxed context")]
    InjectionUnsupported,

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
