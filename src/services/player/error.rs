use crate::services::process::RunError;

/// Reasons a player could not produce fresh metadata this cycle
///
/// Callers branch on the kind: [`NotRunning`](FetchError::NotRunning) and
/// [`NotFound`](FetchError::NotFound) clear the display, the others keep the
/// last known state on screen.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The player's OS process is not alive
    #[error("Player process {0:?} not running")]
    NotRunning(String),

    /// Discovery found no active instance matching the logical name
    #[error("No active player matches {0:?}")]
    NotFound(String),

    /// Title or artist came back empty
    #[error("Player returned empty metadata")]
    EmptyMetadata,

    /// The control utility itself failed or timed out
    #[error("Metadata query failed: {0}")]
    QueryFailed(#[from] RunError),
}

impl FetchError {
    /// Whether this error should clear the displayed state
    pub fn is_authoritative(&self) -> bool {
        matches!(self, FetchError::NotRunning(_) | FetchError::NotFound(_))
    }
}
