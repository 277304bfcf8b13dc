//! File and environment backed stores, and construction from configuration.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::config::{AllowListBackend, SecretBackend};
use super::error::{AccessControlError, AccessControlResult};
use super::ip_encoder::AllowListKey;
use super::store::{
    AllowListRecord, AllowListStore, MemoryAllowList, MemorySecretStore, SecretStore, StoreError,
    StoreResult,
};

/// One address read from an address list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressListEntry {
    /// 1-based line number in the source.
    pub line: usize,
    /// The address as written.
    pub address: String,
    /// Its allow-list key.
    pub key: AllowListKey,
}

/// Parse an address list: one IPv4 address in the first comma-separated
/// column of each line. Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns `MalformedInput` naming the first line that does not encode.
pub fn parse_address_list(content: &str) -> AccessControlResult<Vec<AddressListEntry>> {
    let mut entries = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let address = line.split(',').next().unwrap_or_default().trim();
        let key = AllowListKey::from_address(address).map_err(|e| {
            AccessControlError::MalformedInput(format!("line {}: {e}", index + 1))
        })?;

        entries.push(AddressListEntry {
            line: index + 1,
            address: address.to_string(),
            key,
        });
    }

    Ok(entries)
}

/// Allow-list loaded from an address list file when the gate starts.
#[derive(Debug)]
pub struct FileAllowList {
    path: PathBuf,
    keys: HashSet<String>,
}

impl FileAllowList {
    /// Read and encode the list at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or any line does not encode.
    pub fn load(path: impl AsRef<Path>) -> AccessControlResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AccessControlError::InvalidConfig(format!(
                "cannot read allow-list '{}': {e}",
                path.display()
            ))
        })?;

        let keys = parse_address_list(&content)
            .map_err(|e| AccessControlError::InvalidConfig(format!("{}: {e}", path.display())))?
            .into_iter()
            .map(|entry| entry.key.to_string())
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            keys,
        })
    }

    /// Number of distinct records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the list has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AllowListStore for FileAllowList {
    async fn get(&self, _table: &str, key: &str) -> StoreResult<Option<AllowListRecord>> {
        Ok(self.keys.contains(key).then(|| AllowListRecord::new(key)))
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Secret held in a file. Read on every fetch so rotation takes effect
/// immediately; a single trailing line ending is not part of the value.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Create a store reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_parameter(&self, _name: &str, _decrypt: bool) -> StoreResult<String> {
        let mut value = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    StoreError::NotFound(format!("secret file '{}'", self.path.display()))
                },
                std::io::ErrorKind::PermissionDenied => {
                    StoreError::PermissionDenied(self.path.display().to_string())
                },
                _ => StoreError::Io(e),
            })?;

        if value.ends_with('\n') {
            value.pop();
            if value.ends_with('\r') {
                value.pop();
            }
        }
        Ok(value)
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Secret held in an environment variable, read on every fetch.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    var: String,
}

impl EnvSecretStore {
    /// Create a store reading variable `var`.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_parameter(&self, _name: &str, _decrypt: bool) -> StoreResult<String> {
        std::env::var(&self.var).map_err(|e| match e {
            std::env::VarError::NotPresent => {
                StoreError::NotFound(format!("environment variable '{}'", self.var))
            },
            std::env::VarError::NotUnicode(_) => {
                StoreError::Unavailable(format!("environment variable '{}' is not UTF-8", self.var))
            },
        })
    }

    fn name(&self) -> &str {
        "env"
    }
}

/// Build the allow-list store described by `backend`.
///
/// # Errors
///
/// Fails if an address does not encode or the list file cannot be read.
pub fn build_allow_list(backend: &AllowListBackend) -> AccessControlResult<Arc<dyn AllowListStore>> {
    match backend {
        AllowListBackend::Memory { addresses } => {
            Ok(Arc::new(MemoryAllowList::from_addresses(addresses)?))
        },
        AllowListBackend::File { path } => Ok(Arc::new(FileAllowList::load(path)?)),
    }
}

/// Build the secret store described by `backend`.
#[must_use]
pub fn build_secret_store(backend: &SecretBackend) -> Arc<dyn SecretStore> {
    match backend {
        SecretBackend::Memory { parameters } => {
            Arc::new(MemorySecretStore::from_map(parameters.clone()))
        },
        SecretBackend::File { path } => Arc::new(FileSecretStore::new(path.clone())),
        SecretBackend::Env { var } => Arc::new(EnvSecretStore::new(var.clone())),
    }
}
