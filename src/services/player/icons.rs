use super::{PlaybackStatus, PlayerId};

/// Nerd Font play glyph
pub const ICON_PLAYING: &str = "\u{f01d}";
/// Nerd Font pause glyph
pub const ICON_PAUSED: &str = "\u{f28c}";
/// Shown when the status is neither playing nor paused
pub const ICON_UNKNOWN: &str = "?";

/// Browser glyph, used for firefox instances
pub const ICON_FIREFOX: &str = "\u{f05c3}";
/// Spotify glyph
pub const ICON_SPOTIFY: &str = "\u{f1bc}";
/// Generic music glyph
pub const ICON_DEFAULT: &str = "\u{f500}";

/// Glyph for a playback status
pub fn status_icon(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Playing => ICON_PLAYING,
        PlaybackStatus::Paused => ICON_PAUSED,
        PlaybackStatus::Unknown => ICON_UNKNOWN,
    }
}

/// Glyph identifying the player itself, shown in multi-player output
pub fn player_icon(player: &PlayerId) -> &'static str {
    let id = player.as_str();
    if id.contains("firefox") {
        ICON_FIREFOX
    } else if id == "spotify" {
        ICON_SPOTIFY
    } else {
        ICON_DEFAULT
    }
}
