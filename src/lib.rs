//! nowplaying - media player status poller for status bars.
//!
//! Polls one or all active media players through `playerctl` on a fixed
//! tick and prints a single line per player describing what is playing.
//! The main pieces are:
//!
//! - Player discovery and logical name resolution
//! - Concurrent, deadline-bounded metadata fetches
//! - A shared last-known-state cache that rides out transient failures
//! - Change detection and plain or JSON output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::{io, sync::Arc};
//!
//! use nowplaying::{
//!     config::PollerConfig,
//!     monitor::{Emitter, PollCoordinator},
//!     services::{
//!         player::{MetadataFetcher, PlayerDiscovery, Playerctl, Target},
//!         process::SystemRunner,
//!     },
//! };
//!
//! # async fn run() -> nowplaying::Result<()> {
//! let config = PollerConfig::new(Target::Named("spotify".to_string())).validate()?;
//! let playerctl = Playerctl::new(Arc::new(SystemRunner::new()), config.command_timeout);
//! let emitter = Emitter::new(io::stdout(), config.format, config.emit_mode, false);
//!
//! let coordinator = PollCoordinator::new(
//!     &config,
//!     PlayerDiscovery::new(playerctl.clone()),
//!     MetadataFetcher::new(playerctl),
//!     emitter,
//! );
//! coordinator.run(std::future::pending()).await
//! # }
//! ```

/// Command-line argument parsing.
pub mod cli;

/// Validated runtime settings.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Poll loop, state cache and output.
pub mod monitor;

/// Collaborators: external commands and the players behind them.
pub mod services;

/// Diagnostic logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{PollerError, Result};
