use thiserror::Error;

/// Errors that stop the poller
///
/// Per-player fetch failures never reach this type; they are absorbed by the
/// cache and emitter fallback rules.
#[derive(Error, Debug)]
pub enum PollerError {
    /// Settings failed validation before the loop started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output could not be written, usually because the reader went away
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for poller operations
pub type Result<T> = std::result::Result<T, PollerError>;
