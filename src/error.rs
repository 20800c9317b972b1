//! Error types for sqlscript-rs

use thiserror::Error;

/// Result type alias for sqlscript operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sqlscript operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WalkDir error
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Script file missing on disk, distinct from any in-script failure
    #[error("Script not found: {path}")]
    ScriptNotFound { path: String },

    /// Malformed script structure
    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },

    /// Raised by the connection capability
    #[error("Connection failure: {message}")]
    Connection { message: String },

    /// Assertion mismatch inside a step body. The only error kind the
    /// executor recovers from; everything else aborts the run.
    #[error("Expectation failed: {message}")]
    Expectation { message: String },

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

impl Error {
    /// Create a script error
    pub fn script_error(line: usize, message: impl Into<String>) -> Self {
        Error::Script {
            line,
            message: message.into(),
        }
    }

    /// Create a connection failure
    pub fn connection(message: impl Into<String>) -> Self {
        Error::Connection {
            message: message.into(),
        }
    }

    /// Create an expectation failure
    pub fn expectation(message: impl Into<String>) -> Self {
        Error::Expectation {
            message: message.into(),
        }
    }
}
