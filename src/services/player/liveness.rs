use std::time::Duration;

use tracing::debug;

use super::{FetchError, PlayerId};
use crate::services::process::CommandRunner;

/// Players whose control-utility name differs from their OS process name
const PROCESS_ALIASES: &[(&str, &str)] = &[("firefox", "zen"), ("chromium", "chrome")];

/// OS process name to look for when checking whether `player` is alive
pub fn process_name(player: &PlayerId) -> &str {
    let family = player.family();
    PROCESS_ALIASES
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, process)| *process)
        .unwrap_or(family)
}

/// Check that the OS process behind `player` is running.
///
/// # Errors
/// Returns `FetchError::NotRunning` when `pgrep` finds nothing, or
/// `FetchError::QueryFailed` when `pgrep` itself could not run to completion.
pub async fn ensure_running(
    runner: &dyn CommandRunner,
    player: &PlayerId,
    deadline: Duration,
) -> Result<(), FetchError> {
    let process = process_name(player);

    match runner.run("pgrep", &[process], deadline).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_exit_status() => {
            debug!(%player, process, "player process not running");
            Err(FetchError::NotRunning(process.to_string()))
        }
        Err(e) => Err(FetchError::QueryFailed(e)),
    }
}
