use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{process::Command, time};
use tracing::{instrument, trace};

use super::RunError;

/// Runs an external command and captures its standard output.
///
/// Implementations must honour `deadline`: a command still running when it
/// elapses is abandoned and reported as [`RunError::TimedOut`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, returning captured stdout on a zero exit.
    ///
    /// # Errors
    /// Returns `RunError` if the program cannot be spawned, exits non-zero,
    /// or outlives `deadline`.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        deadline: Duration,
    ) -> Result<Vec<u8>, RunError>;
}

/// [`CommandRunner`] backed by real subprocesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a new SystemRunner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    #[instrument(level = "trace", skip(self))]
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        deadline: Duration,
    ) -> Result<Vec<u8>, RunError> {
        let started = time::Instant::now();

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = time::timeout(deadline, child.wait_with_output())
            .await
            .map_err(|_| RunError::TimedOut {
                program: program.to_string(),
                deadline,
            })?
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        trace!(elapsed = ?started.elapsed(), status = ?output.status, "command finished");

        if !output.status.success() {
            return Err(RunError::ExitStatus {
                program: program.to_string(),
                code: output.status.code(),
            });
        }

        Ok(output.stdout)
    }
}
