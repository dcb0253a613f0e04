//! Error types for registration, configuration and catalog loading.
//!
//! Parse-time problems are not errors in this sense: they are recorded as
//! [`ParseError`](crate::ParseError) data on the parse result so that one
//! line can report every issue at once.

use thiserror::Error;

use crate::result::ErrorKind;
use crate::validate::SpecError;

/// Errors that abort startup or a file operation.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A command with the same (case-insensitive) name is already registered.
    #[error("command already registered: {0}")]
    DuplicateCommand(String),

    /// A command spec violates a structural invariant.
    #[error("invalid spec for command '{command}': {source}")]
    InvalidSpec {
        command: String,
        #[source]
        source: SpecError,
    },

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Classification shared with parse-time diagnostics, where one applies.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::DuplicateCommand(_) => Some(ErrorKind::DuplicateCommand),
            _ => None,
        }
    }
}

/// Convenience alias for results with [`ConsoleError`].
pub type Result<T> = std::result::Result<T, ConsoleError>;
