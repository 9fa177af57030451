use std::{sync::Arc, time::Duration};

use tracing::debug;

use super::{FetchError, PlayerId};
use crate::services::process::CommandRunner;

/// Name of the control utility binary
pub const PLAYERCTL: &str = "playerctl";

/// Metadata fields the fetcher asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    /// Track artist
    Artist,
    /// Track title
    Title,
    /// Album, doubles as artist for podcast-style content
    Album,
}

impl MetadataField {
    /// Key understood by `playerctl metadata`
    pub fn key(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Title => "title",
            Self::Album => "album",
        }
    }
}

/// Thin client for the `playerctl` command line utility
///
/// Every invocation is bounded by the same per-command deadline.
#[derive(Clone)]
pub struct Playerctl {
    runner: Arc<dyn CommandRunner>,
    deadline: Duration,
}

impl Playerctl {
    /// Create a client that runs commands through `runner`
    pub fn new(runner: Arc<dyn CommandRunner>, deadline: Duration) -> Self {
        Self { runner, deadline }
    }

    /// Per-command deadline
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// The runner used for every command, shared with the liveness check
    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Identifiers of all active players, in the order the utility lists them
    ///
    /// Any failure collapses to an empty list.
    pub async fn list_players(&self) -> Vec<PlayerId> {
        match self.runner.run(PLAYERCTL, &["-l"], self.deadline).await {
            Ok(output) => parse_player_list(&output),
            Err(e) => {
                debug!(error = %e, "listing players failed");
                Vec::new()
            }
        }
    }

    /// Raw output of `playerctl -p <id> status`
    ///
    /// # Errors
    /// Returns `FetchError::QueryFailed` if the command fails or times out
    pub async fn status(&self, player: &PlayerId) -> Result<Vec<u8>, FetchError> {
        let output = self
            .runner
            .run(PLAYERCTL, &["-p", player.as_str(), "status"], self.deadline)
            .await?;
        Ok(output)
    }

    /// Raw output of `playerctl -p <id> metadata <field>`
    ///
    /// # Errors
    /// Returns `FetchError::QueryFailed` if the command fails or times out
    pub async fn metadata(
        &self,
        player: &PlayerId,
        field: MetadataField,
    ) -> Result<Vec<u8>, FetchError> {
        let output = self
            .runner
            .run(
                PLAYERCTL,
                &["-p", player.as_str(), "metadata", field.key()],
                self.deadline,
            )
            .await?;
        Ok(output)
    }
}

/// Split `playerctl -l` output into identifiers, dropping blank lines
pub fn parse_player_list(output: &[u8]) -> Vec<PlayerId> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PlayerId::from)
        .collect()
}
