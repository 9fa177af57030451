use std::time::Duration;

/// Errors that can occur while running an external command
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// The command could not be started at all
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully
    #[error("{program} exited with status {code:?}")]
    ExitStatus {
        /// Program that exited
        program: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// The command did not finish before its deadline
    #[error("{program} timed out after {deadline:?}")]
    TimedOut {
        /// Program that was killed
        program: String,
        /// Deadline that elapsed
        deadline: Duration,
    },
}

impl RunError {
    /// Whether the command ran to completion and reported failure through its exit code.
    pub fn is_exit_status(&self) -> bool {
        matches!(self, RunError::ExitStatus { .. })
    }
}
