use tracing::{debug, instrument};

use super::{
    FetchError, PlaybackStatus, PlayerId, PlayerState, liveness,
    playerctl::{MetadataField, Playerctl},
};

/// Trim a raw command output and escape it for a markup renderer.
pub fn normalize(raw: &[u8]) -> String {
    escape_markup(String::from_utf8_lossy(raw).trim())
}

/// Escape `&`, which status bar renderers treat as the start of an entity.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
}

/// Artist to display after applying the album fallback.
///
/// Some players (Spotify podcasts) leave the artist empty and put the show
/// name in the album. A non-empty album always wins, even over a present
/// artist.
pub fn effective_artist(artist: String, album: String) -> String {
    if artist.is_empty() || !album.is_empty() {
        album
    } else {
        artist
    }
}

/// Assemble a [`PlayerState`] from normalized fields.
///
/// # Errors
/// Returns `FetchError::EmptyMetadata` if the title or effective artist is empty
pub fn resolve_state(
    status: PlaybackStatus,
    artist: String,
    album: String,
    title: String,
) -> Result<PlayerState, FetchError> {
    let artist = effective_artist(artist, album);

    if title.is_empty() || artist.is_empty() {
        return Err(FetchError::EmptyMetadata);
    }

    Ok(PlayerState {
        status,
        artist,
        title,
    })
}

/// Fetches one player's state in a single round trip
#[derive(Clone)]
pub struct MetadataFetcher {
    playerctl: Playerctl,
}

impl MetadataFetcher {
    /// Create a fetcher over a control utility client
    pub fn new(playerctl: Playerctl) -> Self {
        Self { playerctl }
    }

    /// Check liveness, then query status, album, artist and title concurrently.
    ///
    /// A failed album query counts as an empty album.
    ///
    /// # Errors
    /// - `NotRunning` when the player's process is gone
    /// - `QueryFailed` when the status, artist or title query fails or times out
    /// - `EmptyMetadata` when title or effective artist is empty
    #[instrument(skip_all, fields(player = %player))]
    pub async fn fetch(&self, player: &PlayerId) -> Result<PlayerState, FetchError> {
        liveness::ensure_running(self.playerctl.runner(), player, self.playerctl.deadline())
            .await?;

        let (status, album, artist, title) = futures::join!(
            self.playerctl.status(player),
            self.playerctl.metadata(player, MetadataField::Album),
            self.playerctl.metadata(player, MetadataField::Artist),
            self.playerctl.metadata(player, MetadataField::Title),
        );

        // playerctl exits non-zero for a missing key; album is optional
        let album = album.unwrap_or_else(|e| {
            debug!(error = %e, "album unavailable, treating as empty");
            Vec::new()
        });

        let status = PlaybackStatus::from(&*String::from_utf8_lossy(&status?));
        let state = resolve_state(
            status,
            normalize(&artist?),
            normalize(&album),
            normalize(&title?),
        )?;

        debug!(artist = %state.artist, title = %state.title, "fetched player state");
        Ok(state)
    }
}
