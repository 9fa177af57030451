use std::fmt;

/// Concrete instance identifier reported by the control utility
///
/// e.g. `spotify` or `firefox.instance_1_2`. May change between ticks when a
/// player restarts, so it is re-resolved every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a PlayerId from the identifier printed by the control utility
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Player family, the part of the identifier before the first `.`
    pub fn family(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Current playback status of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Stopped, or anything the utility reported that we do not recognise
    #[default]
    Unknown,
}

impl PlaybackStatus {
    /// Lowercase name, used as a CSS class by JSON consumers
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for PlaybackStatus {
    fn from(status: &str) -> Self {
        if status.contains("Playing") {
            Self::Playing
        } else if status.contains("Paused") {
            Self::Paused
        } else {
            Self::Unknown
        }
    }
}

/// Last observed playback state of one player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerState {
    /// Playback status
    pub status: PlaybackStatus,

    /// Effective artist, after the album fallback rule
    pub artist: String,

    /// Track title
    pub title: String,
}

impl PlayerState {
    /// Creates a new PlayerState
    pub fn new(status: PlaybackStatus, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            status,
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Whether any field carries information worth caching
    pub fn has_content(&self) -> bool {
        self.status != PlaybackStatus::Unknown || self.has_text()
    }

    /// Whether there is anything to print
    pub fn has_text(&self) -> bool {
        !self.artist.is_empty() || !self.title.is_empty()
    }
}

/// Which players a poll cycle covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single player given by logical name, e.g. `firefox`
    Named(String),

    /// Every player the control utility lists
    All,
}

impl Target {
    /// Whether this target covers every active player
    pub fn is_all(&self) -> bool {
        matches!(self, Target::All)
    }
}
