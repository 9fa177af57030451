//! Runtime configuration for the poller.
//!
//! There is no configuration file: every setting comes from the command
//! line and is validated into a [`PollerConfig`] before the loop starts.

mod log_level;


use std::time::Duration;

use clap::ValueEnum;

pub use log_level::{LogFormat, LogLevel};

use crate::{core::PollerError, services::player::Target};

/// Default tick period in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
/// Shortest tick period accepted, in milliseconds
pub const MIN_INTERVAL_MS: u64 = 100;
/// Default per-command deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 500;
/// Default number of missed cycles before a player is forgotten
pub const DEFAULT_EVICT_AFTER: u32 = 3;

/// How status lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `<icon> <artist> - <title>` text lines
    #[default]
    Plain,

    /// One JSON object per line with `text` and `class` fields
    Json,
}

/// When a state is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// Every tick, even if nothing changed
    #[default]
    EveryTick,

    /// Only when the state differs from the last one written for that player
    OnChange,
}

/// Validated poller settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Players to poll
    pub target: Target,

    /// Tick period
    pub interval: Duration,

    /// Deadline for each external command, shorter than `interval`
    pub command_timeout: Duration,

    /// Change suppression
    pub emit_mode: EmitMode,

    /// Cycles a player may be missing before its cache entry is dropped, 0 keeps forever
    pub evict_after: u32,

    /// Output encoding
    pub format: OutputFormat,
}

impl PollerConfig {
    /// Defaults for a target: one second ticks, half second deadline.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            command_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            emit_mode: EmitMode::default(),
            evict_after: DEFAULT_EVICT_AFTER,
            format: OutputFormat::default(),
        }
    }

    /// Check the invariants the poll loop relies on.
    ///
    /// # Errors
    /// Returns `PollerError::InvalidConfig` if the interval is too short, the
    /// command deadline is not shorter than the interval, or a named target
    /// is blank.
    pub fn validate(self) -> Result<Self, PollerError> {
        if self.interval < Duration::from_millis(MIN_INTERVAL_MS) {
            return Err(PollerError::InvalidConfig(format!(
                "interval must be at least {MIN_INTERVAL_MS}ms, got {:?}",
                self.interval
            )));
        }

        if self.command_timeout.is_zero() || self.command_timeout >= self.interval {
            return Err(PollerError::InvalidConfig(format!(
                "command timeout ({:?}) must be non-zero and shorter than the interval ({:?})",
                self.command_timeout, self.interval
            )));
        }

        if let Target::Named(name) = &self.target {
            if name.trim().is_empty() {
                return Err(PollerError::InvalidConfig(
                    "player name must not be empty".to_string(),
                ));
            }
        }

        Ok(self)
    }
}
