use std::time::Duration;

use clap::{ArgGroup, Parser};

use super::CliError;
use crate::{
    config::{
        DEFAULT_EVICT_AFTER, DEFAULT_INTERVAL_MS, DEFAULT_TIMEOUT_MS, EmitMode, LogFormat,
        LogLevel, OutputFormat, PollerConfig,
    },
    services::player::Target,
};

/// Print the now-playing line of a media player for a status bar.
#[derive(Parser, Debug)]
#[command(name = "nowplaying", version)]
#[command(about = "Poll media players through playerctl and print a status line per tick")]
#[command(after_help = "Examples:\n  nowplaying spotify\n  nowplaying --all --on-change")]
#[command(group(ArgGroup::new("target").required(true).args(["player", "all"])))]
pub struct Cli {
    /// Player to follow, matched as a substring of the active player names (e.g. firefox)
    pub player: Option<String>,

    /// Follow every active player, prefixing each line with the player icon
    #[arg(short, long)]
    pub all: bool,

    /// Tick period in milliseconds, at least 100
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval: u64,

    /// Deadline for each playerctl/pgrep call in milliseconds, must be below the interval
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Only print when a player's state changes
    #[arg(long)]
    pub on_change: bool,

    /// Forget a player after it has been missing for this many cycles (0 never forgets)
    #[arg(long, value_name = "CYCLES", default_value_t = DEFAULT_EVICT_AFTER)]
    pub evict_after: u32,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Diagnostic verbosity on stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Diagnostic format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Polling target selected by the arguments
    pub fn target(&self) -> Target {
        match &self.player {
            Some(name) if !self.all => Target::Named(name.clone()),
            _ => Target::All,
        }
    }

    /// Build and validate the poller settings.
    ///
    /// # Errors
    /// Returns `CliError::InvalidArguments` if the settings are inconsistent
    pub fn to_config(&self) -> Result<PollerConfig, CliError> {
        let config = PollerConfig {
            target: self.target(),
            interval: Duration::from_millis(self.interval),
            command_timeout: Duration::from_millis(self.timeout),
            emit_mode: if self.on_change {
                EmitMode::OnChange
            } else {
                EmitMode::EveryTick
            },
            evict_after: self.evict_after,
            format: self.format,
        };

        Ok(config.validate()?)
    }
}
