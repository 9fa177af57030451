use tracing::{debug, instrument};

use super::{FetchError, PlayerId, playerctl::Playerctl};

/// Lists active players and resolves logical names to concrete instances
#[derive(Clone)]
pub struct PlayerDiscovery {
    playerctl: Playerctl,
}

impl PlayerDiscovery {
    /// Create a discovery handler over a control utility client
    pub fn new(playerctl: Playerctl) -> Self {
        Self { playerctl }
    }

    /// Active players in the order the control utility reports them.
    ///
    /// Never fails: a broken query yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Vec<PlayerId> {
        let players = self.playerctl.list_players().await;
        debug!(count = players.len(), "discovered active players");
        players
    }
}

/// Find the first active player whose identifier contains `logical_name`.
///
/// # Errors
/// Returns `FetchError::NotFound` if no identifier contains the name
pub fn resolve(players: &[PlayerId], logical_name: &str) -> Result<PlayerId, FetchError> {
    players
        .iter()
        .find(|player| player.as_str().contains(logical_name))
        .cloned()
        .ok_or_else(|| FetchError::NotFound(logical_name.to_string()))
}
