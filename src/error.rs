//! Error types
//!
//! Fatal conditions of a sanitizer run. Lines that cannot be classified are
//! never errors; they are only counted (see [`crate::pipeline::Discard`]).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a run or prevent it from starting
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// Invalid configuration, detected before any line is processed
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The input could not be opened or read
    #[error("Failed to read source {path:?}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line source failed mid-run
    #[error("Failed to read input line {line}")]
    LineRead {
        line: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Output could not be created or written
    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, SanitizeError>;

impl SanitizeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether this error was raised before the run started
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Render an error with all of its causes, `outer: inner: root`
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
