//! Error types for the Lingua CLI.

use lingua_i18n::I18nError;
use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// Error from tag resolution or message handling
    I18n(I18nError),

    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Invalid argument
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::I18n(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::I18n(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArgument(_) => None,
        }
    }
}

impl From<I18nError> for CliError {
    fn from(e: I18nError) -> Self {
        CliError::I18n(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
