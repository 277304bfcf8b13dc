//! Read-only store ports used by the decision engine.
//!
//! The engine only ever reads: a point lookup in the allow-list table and a
//! single parameter fetch from the secret store. Backends are shared across
//! concurrent requests behind `Arc<dyn ...>` and must not hold per-request
//! state.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;

use super::ip_encoder::AllowListKey;

/// Result type for store reads.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure talking to an external store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The read did not complete in time.
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// The store rejected the caller's credentials.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The named table or parameter does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Local I/O failure in a file-backed store.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run a store read with an upper bound on its duration.
///
/// # Errors
///
/// Returns the read's own error, or `StoreError::Timeout` if it ran past `limit`.
pub async fn bounded<T, F>(limit: Duration, read: F) -> StoreResult<T>
where
    F: std::future::Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(limit, read)
        .await
        .unwrap_or(Err(StoreError::Timeout(limit)))
}

/// A record found in the allow-list. Only its presence matters to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowListRecord {
    /// The key that was looked up.
    pub key: String,

    /// Any attributes the store returned alongside the key.
    pub attributes: HashMap<String, String>,
}

impl AllowListRecord {
    /// A record carrying only its key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            attributes: HashMap::new(),
        }
    }
}

/// Point-read access to the allow-list table.
#[async_trait]
pub trait AllowListStore: Send + Sync {
    /// Look up `key` (decimal encoded address) in `table`.
    async fn get(&self, table: &str, key: &str) -> StoreResult<Option<AllowListRecord>>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// Point-read access to the secret parameter store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the value of parameter `name`, decrypting it if asked.
    async fn get_parameter(&self, name: &str, decrypt: bool) -> StoreResult<String>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// In-memory allow-list. The table name is not checked.
#[derive(Debug, Default)]
pub struct MemoryAllowList {
    keys: HashSet<String>,
}

impl MemoryAllowList {
    /// Create an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from dotted-quad addresses.
    ///
    /// # Errors
    ///
    /// Fails on the first address that does not encode.
    pub fn from_addresses<I, S>(addresses: I) -> super::AccessControlResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = addresses
            .into_iter()
            .map(|addr| AllowListKey::from_address(addr.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_keys(keys))
    }

    /// Build from already encoded keys.
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = AllowListKey>) -> Self {
        Self {
            keys: keys.into_iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the list has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl AllowListStore for MemoryAllowList {
    async fn get(&self, _table: &str, key: &str) -> StoreResult<Option<AllowListRecord>> {
        Ok(self.keys.contains(key).then(|| AllowListRecord::new(key)))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// In-memory parameter store. Values are held in plain text, so `decrypt`
/// has no effect.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    parameters: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single parameter.
    #[must_use]
    pub fn with_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.put(name, value);
        store
    }

    /// Create a store from a name -> value map.
    #[must_use]
    pub fn from_map(parameters: HashMap<String, String>) -> Self {
        Self {
            parameters: RwLock::new(parameters),
        }
    }

    /// Set or rotate a parameter value.
    pub fn put(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut parameters = self
            .parameters
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        parameters.insert(name.into(), value.into());
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_parameter(&self, name: &str, _decrypt: bool) -> StoreResult<String> {
        let parameters = self
            .parameters
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        parameters
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("parameter '{name}'")))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
