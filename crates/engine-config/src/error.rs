use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config file {path}: {reason}")]
    Parse { path: String, reason: String },

    /// A `.env` line that is not `KEY=VALUE`.
    #[error("Invalid env file: {0}")]
    EnvLine(String),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required setting: {0}")]
    Missing(String),
}
