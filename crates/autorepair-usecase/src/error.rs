//! Error types for the use case layer

use thiserror::Error;

use crate::port::host::HostError;

/// Errors that end a single repair cycle
#[derive(Debug, Error)]
pub enum RepairError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Polling loop task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, RepairError>;
