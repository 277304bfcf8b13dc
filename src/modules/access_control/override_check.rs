//! Secret override stage.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::error::AccessControlError;
use super::query::{ParamLookup, QueryParams};
use super::store::{bounded, SecretStore};

/// Outcome of the override check.
#[derive(Debug)]
pub enum OverrideOutcome {
    /// Token matched the secret.
    Accepted,
    /// No usable token (absent, empty or repeated); the store was not called.
    Missing,
    /// Token did not match.
    Mismatch(AccessControlError),
    /// Secret could not be fetched; no comparison was made.
    SecretUnavailable(AccessControlError),
}

impl OverrideOutcome {
    /// Returns `true` only for an accepted token.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Checks the override query parameter against the secret store.
pub struct OverrideChecker {
    store: Arc<dyn SecretStore>,
    parameter: String,
    decrypt: bool,
    param_name: String,
    timeout: Duration,
}

impl std::fmt::Debug for OverrideChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideChecker")
            .field("store", &self.store.name())
            .field("parameter", &self.parameter)
            .field("decrypt", &self.decrypt)
            .field("param_name", &self.param_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OverrideChecker {
    /// Create a checker comparing query parameter `param_name` against
    /// secret `parameter` in `store`.
    #[must_use]
    pub fn new(
        store: Arc<dyn SecretStore>,
        parameter: impl Into<String>,
        param_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            parameter: parameter.into(),
            decrypt: true,
            param_name: param_name.into(),
            timeout,
        }
    }

    /// Set whether the store is asked to decrypt the secret.
    #[must_use]
    pub fn with_decrypt(mut self, decrypt: bool) -> Self {
        self.decrypt = decrypt;
        self
    }

    /// Check a raw query string. The secret is fetched on every call.
    pub async fn check(&self, query: &str) -> OverrideOutcome {
        let params = QueryParams::parse(query);

        let token = match params.lookup(&self.param_name) {
            ParamLookup::Single(token) => token,
            ParamLookup::Absent => return OverrideOutcome::Missing,
            ParamLookup::Repeated => {
                debug!(param = %self.param_name, "override parameter repeated");
                return OverrideOutcome::Missing;
            },
        };

        let fetch = self.store.get_parameter(&self.parameter, self.decrypt);
        let secret = match bounded(self.timeout, fetch).await {
            Ok(secret) => secret,
            Err(source) => {
                error!(
                    store = self.store.name(),
                    parameter = %self.parameter,
                    error = %source,
                    "secret fetch failed"
                );
                return OverrideOutcome::SecretUnavailable(AccessControlError::StoreUnavailable {
                    store: "secret",
                    source,
                });
            },
        };

        if constant_time_eq(token.as_bytes(), secret.as_bytes()) {
            OverrideOutcome::Accepted
        } else {
            OverrideOutcome::Mismatch(AccessControlError::PolicyMismatch)
        }
    }
}

/// Byte comparison whose duration does not depend on where inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
