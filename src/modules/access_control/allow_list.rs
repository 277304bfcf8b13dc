//! Allow-list resolution stage.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::error::AccessControlError;
use super::ip_encoder::AllowListKey;
use super::store::{bounded, AllowListStore};

/// Outcome of an allow-list lookup.
#[derive(Debug)]
pub enum Resolution {
    /// A record exists; the request passes.
    Found,
    /// No record; the override check decides.
    NotFound,
    /// The lookup failed; the request is restricted.
    StoreError(AccessControlError),
}

/// Looks client addresses up in the allow-list table.
pub struct AllowListResolver {
    store: Arc<dyn AllowListStore>,
    table: String,
    timeout: Duration,
}

impl std::fmt::Debug for AllowListResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllowListResolver")
            .field("store", &self.store.name())
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AllowListResolver {
    /// Create a resolver over `store` reading `table`.
    #[must_use]
    pub fn new(store: Arc<dyn AllowListStore>, table: impl Into<String>, timeout: Duration) -> Self {
        Self {
            store,
            table: table.into(),
            timeout,
        }
    }

    /// Single point lookup of `key`. A failure is logged here, once.
    pub async fn resolve(&self, key: AllowListKey) -> Resolution {
        let key_str = key.to_string();

        match bounded(self.timeout, self.store.get(&self.table, &key_str)).await {
            Ok(Some(_)) => {
                debug!(table = %self.table, key = %key_str, "allow-list hit");
                Resolution::Found
            },
            Ok(None) => Resolution::NotFound,
            Err(source) => {
                error!(
                    store = self.store.name(),
                    table = %self.table,
                    key = %key_str,
                    error = %source,
                    "allow-list lookup failed"
                );
                Resolution::StoreError(AccessControlError::StoreUnavailable {
                    store: "allow-list",
                    source,
                })
            },
        }
    }
}
