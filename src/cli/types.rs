use thiserror::Error;

use crate::core::PollerError;

/// Errors that can occur while turning arguments into settings.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments were provided.
    ///
    /// Returned when the arguments parse but describe settings the poller
    /// cannot run with, such as a timeout longer than the interval.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl From<PollerError> for CliError {
    fn from(error: PollerError) -> Self {
        match error {
            PollerError::InvalidConfig(details) => CliError::InvalidArguments(details),
            other => CliError::InvalidArguments(other.to_string()),
        }
    }
}
