use std::fmt;

use clap::ValueEnum;

/// Logging level for the application.
///
/// Controls the verbosity of diagnostics on stderr, from critical errors
/// only to detailed trace information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only show errors that stop polling.
    Error,

    /// Show warnings and errors, such as cycles overrunning their interval (default level).
    #[default]
    Warn,

    /// Show informational messages, warnings, and errors.
    Info,

    /// Show per-cycle discovery and fetch failures.
    Debug,

    /// Show every external command that is run (very verbose).
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Shape of diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Multi-line, human oriented.
    Pretty,

    /// One line per event.
    #[default]
    Compact,

    /// One JSON object per event.
    Json,
}
