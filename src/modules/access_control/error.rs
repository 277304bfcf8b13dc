//! Error types for access control.

use thiserror::Error;

use super::store::StoreError;

/// Result type for access control operations.
pub type AccessControlResult<T> = Result<T, AccessControlError>;

/// Errors that can occur while deciding a request.
///
/// None of these cross the invocation boundary: each is converted into a
/// restrict decision by the stage that produced it.
#[derive(Debug, Error)]
pub enum AccessControlError {
    /// A store could not be reached or refused the read.
    #[error("{store} unavailable: {source}")]
    StoreUnavailable {
        /// Which store failed.
        store: &'static str,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },

    /// Client address or edge event could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An override token was supplied but did not match the secret.
    #[error("override token does not match")]
    PolicyMismatch,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_display() {
        let err = AccessControlError::MalformedInput("expected 4 octets".to_string());
        assert_eq!(err.to_string(), "malformed input: expected 4 octets");

        let err = AccessControlError::StoreUnavailable {
            store: "allow-list",
            source: StoreError::Timeout(Duration::from_millis(250)),
        };
        assert_eq!(
            err.to_string(),
            "allow-list unavailable: timed out after 250ms"
        );

        assert_eq!(
            AccessControlError::PolicyMismatch.to_string(),
            "override token does not match"
        );
    }
}
