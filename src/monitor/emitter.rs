use std::{collections::HashMap, io::Write};

use serde::Serialize;
use tracing::trace;

use crate::{
    config::{EmitMode, OutputFormat},
    services::player::{PlayerId, PlayerState, icons},
};

/// JSON line understood by waybar-style custom modules
#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    text: String,
    class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<&'a str>,
}

/// Formats player states and writes one line per emission.
///
/// In [`EmitMode::OnChange`] a state identical to the last one written for
/// the same player is suppressed, except when it is repeated as a fallback
/// after a failed fetch. A cleared display always produces a blank
/// line and forgets the last state, so the next real state is printed again.
pub struct Emitter<W: Write> {
    writer: W,
    format: OutputFormat,
    mode: EmitMode,
    show_player_icon: bool,
    last_emitted: HashMap<PlayerId, PlayerState>,
}

impl<W: Write> Emitter<W> {
    /// Create an emitter writing to `writer`.
    ///
    /// `show_player_icon` prefixes each line with the player glyph, which is
    /// only useful when several players share one output.
    pub fn new(writer: W, format: OutputFormat, mode: EmitMode, show_player_icon: bool) -> Self {
        Self {
            writer,
            format,
            mode,
            show_player_icon,
            last_emitted: HashMap::new(),
        }
    }

    /// Write `state` for `player` unless it has nothing to show or is unchanged.
    ///
    /// Returns whether a line was written.
    ///
    /// # Errors
    /// Returns an I/O error if the output cannot be written
    pub fn emit(&mut self, player: &PlayerId, state: &PlayerState) -> std::io::Result<bool> {
        if !state.has_text() {
            return Ok(false);
        }

        if self.mode == EmitMode::OnChange && self.last_emitted.get(player) == Some(state) {
            trace!(%player, "state unchanged, suppressed");
            return Ok(false);
        }

        self.write_state(player, state)?;
        Ok(true)
    }

    /// Write the last known `state` for `player` after a failed fetch.
    ///
    /// Unlike [`Emitter::emit`] an unchanged state is never suppressed, so
    /// the display keeps its line through a transient failure in either mode.
    /// Returns whether a line was written.
    ///
    /// # Errors
    /// Returns an I/O error if the output cannot be written
    pub fn repeat(&mut self, player: &PlayerId, state: &PlayerState) -> std::io::Result<bool> {
        if !state.has_text() {
            return Ok(false);
        }

        self.write_state(player, state)?;
        Ok(true)
    }

    /// Write the blank line that tells the display `player` is gone.
    ///
    /// # Errors
    /// Returns an I/O error if the output cannot be written
    pub fn clear(&mut self, player: &PlayerId) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Plain => writeln!(self.writer)?,
            OutputFormat::Json => self.write_json(&JsonLine {
                text: String::new(),
                class: "stopped",
                player: Some(player.as_str()),
            })?,
        }
        self.writer.flush()?;

        self.last_emitted.remove(player);
        Ok(())
    }

    /// Drop change-tracking state for players that were evicted
    pub fn forget<'a>(&mut self, players: impl IntoIterator<Item = &'a PlayerId>) {
        for player in players {
            self.last_emitted.remove(player);
        }
    }

    /// Borrow the underlying writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Text of one status line, e.g. `<play> Band - Song`
    pub fn render(&self, player: &PlayerId, state: &PlayerState) -> String {
        let status = icons::status_icon(state.status);
        if self.show_player_icon {
            format!(
                "{} {status} {} - {}",
                icons::player_icon(player),
                state.artist,
                state.title
            )
        } else {
            format!("{status} {} - {}", state.artist, state.title)
        }
    }

    fn write_state(&mut self, player: &PlayerId, state: &PlayerState) -> std::io::Result<()> {
        let text = self.render(player, state);
        match self.format {
            OutputFormat::Plain => writeln!(self.writer, "{text}")?,
            OutputFormat::Json => self.write_json(&JsonLine {
                text,
                class: state.status.as_str(),
                player: Some(player.as_str()),
            })?,
        }
        self.writer.flush()?;

        self.last_emitted.insert(player.clone(), state.clone());
        Ok(())
    }

    fn write_json(&mut self, line: &JsonLine<'_>) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        writeln!(self.writer)
    }
}
