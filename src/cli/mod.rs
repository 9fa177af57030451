//! Command-line interface.
//!
//! Parses the invocation into a validated [`PollerConfig`](crate::config::PollerConfig).
//! Any invocation error is reported with usage on stdout and a non-zero exit,
//! before the poll loop starts.

mod args;
pub mod formatting;
mod types;


pub use args::Cli;
pub use types::CliError;
