//! Module error types and result aliases.

use thiserror::Error;

/// Result type alias for module operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Errors that can occur during module lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum ModuleError {
    /// Module failed to start.
    #[error("start failed: {0}")]
    StartFailed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Module is in an invalid state for the requested operation.
    #[error("invalid state: current={current}, expected={expected}")]
    InvalidState {
        /// Current state of the module.
        current: String,
        /// Expected state for the operation.
        expected: String,
    },
}
