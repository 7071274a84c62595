//! Error types for the auto-repair agent

use thiserror::Error;

/// Error thrown when a configuration value is out of range
#[derive(Debug, Error)]
#[error("Invalid value for '{field}': {reason}")]
pub struct InvalidConfigError {
    pub field: String,
    pub reason: String,
}

/// General error type
#[derive(Debug, Error)]
pub enum AutoRepairError {
    #[error(transparent)]
    InvalidConfig(#[from] InvalidConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AutoRepairError>;
