//! Error types for the CLI

use suiterun::runner::RunVerdict;
use suiterun::RunError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Run or library error
    #[error("{0}")]
    Run(#[from] RunError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Summary serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Process exit code
    ///
    /// 0 is reserved for a succeeded run; an inconclusive run exits with 2,
    /// an interrupted one with 130 and every other failure with 1.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Run(RunError::RunFailed {
                verdict: RunVerdict::Inconclusive,
                ..
            }) => 2,
            Self::Run(RunError::Cancelled) => 130,
            _ => 1,
        }
    }
}
