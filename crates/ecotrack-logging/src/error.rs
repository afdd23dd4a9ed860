//! Error types for logging setup

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create rolling appender in {path}: {reason}")]
    Appender { path: PathBuf, reason: String },

    #[error("Invalid filter directives {directives:?}: {reason}")]
    Filter { directives: String, reason: String },

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// Result type for logging setup
pub type LoggingResult<T> = Result<T, LoggingError>;
