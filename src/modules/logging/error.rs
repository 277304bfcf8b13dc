//! Logging error types

use thiserror::Error;

/// Result type for logging operations
pub type LogResult<T> = Result<T, LogError>;

/// Logging errors
#[derive(Debug, Error)]
pub enum LogError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A global subscriber is already installed
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}
