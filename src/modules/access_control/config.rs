//! Configuration for the access decision engine and its stores.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Path substituted into every restricted request.
pub const DEFAULT_RESTRICTED_PATH: &str = "/restricted.html";

/// Query parameter carrying the override token.
pub const DEFAULT_OVERRIDE_PARAM: &str = "ipr";

/// Document name that is always checked even though it contains a dot.
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// Logical name of the allow-list table.
pub const DEFAULT_TABLE: &str = "restrict-ip-table";

/// Name of the override secret in the parameter store.
pub const DEFAULT_SECRET_PARAMETER: &str = "/develop/shared/restrict_flag";

/// Environment variable read by the default secret backend.
pub const DEFAULT_SECRET_ENV_VAR: &str = "EDGE_GATE_RESTRICT_FLAG";

/// Decision policy (`[gate]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Instance name used in logs and metrics.
    pub name: String,

    /// Path written into restricted requests.
    pub restricted_path: String,

    /// Query parameter carrying the override token.
    pub override_param: String,

    /// Page document that is never treated as an asset.
    pub index_document: String,

    /// Upper bound for a single store round-trip.
    pub store_timeout_ms: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            name: "edge-gate".to_string(),
            restricted_path: DEFAULT_RESTRICTED_PATH.to_string(),
            override_param: DEFAULT_OVERRIDE_PARAM.to_string(),
            index_document: DEFAULT_INDEX_DOCUMENT.to_string(),
            store_timeout_ms: 3000,
        }
    }
}

impl PolicyConfig {
    /// Store round-trip timeout as a `Duration`.
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("gate.name cannot be empty".to_string());
        }
        if !self.restricted_path.starts_with('/') {
            return Err(format!(
                "gate.restricted_path must start with '/', got '{}'",
                self.restricted_path
            ));
        }
        if self.override_param.is_empty() {
            return Err("gate.override_param cannot be empty".to_string());
        }
        if self.index_document.is_empty() {
            return Err("gate.index_document cannot be empty".to_string());
        }
        if self.store_timeout_ms == 0 {
            return Err("gate.store_timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Allow-list store configuration (`[allow_list]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowListConfig {
    /// Logical table name passed to every lookup.
    pub table: String,

    /// Backend holding the records.
    pub backend: AllowListBackend,
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            backend: AllowListBackend::default(),
        }
    }
}

impl AllowListConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.table.is_empty() {
            return Err("allow_list.table cannot be empty".to_string());
        }
        self.backend
            .validate()
            .map_err(|e| format!("allow_list.backend: {e}"))
    }
}

/// Where allow-list records come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AllowListBackend {
    /// Addresses listed inline.
    Memory {
        /// Dotted-quad IPv4 addresses.
        #[serde(default)]
        addresses: Vec<String>,
    },

    /// Address list file, read once at start.
    File {
        /// Path to the list (first CSV column per line).
        path: PathBuf,
    },
}

impl Default for AllowListBackend {
    fn default() -> Self {
        Self::Memory {
            addresses: Vec::new(),
        }
    }
}

impl AllowListBackend {
    /// Validate the backend configuration.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Memory { addresses } => {
                if addresses.iter().any(String::is_empty) {
                    return Err("empty address in list".to_string());
                }
            },
            Self::File { path } => {
                if path.as_os_str().is_empty() {
                    return Err("file backend requires a path".to_string());
                }
            },
        }
        Ok(())
    }
}

/// Secret store configuration (`[secret]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretConfig {
    /// Name of the override secret.
    pub parameter: String,

    /// Ask the store to decrypt the value.
    pub decrypt: bool,

    /// Backend holding the secret.
    pub backend: SecretBackend,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            parameter: DEFAULT_SECRET_PARAMETER.to_string(),
            decrypt: true,
            backend: SecretBackend::default(),
        }
    }
}

impl SecretConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parameter.is_empty() {
            return Err("secret.parameter cannot be empty".to_string());
        }
        self.backend
            .validate()
            .map_err(|e| format!("secret.backend: {e}"))
    }
}

/// Where the override secret comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SecretBackend {
    /// Parameters held in memory (name -> value).
    Memory {
        /// Parameter values by name.
        #[serde(default)]
        parameters: HashMap<String, String>,
    },

    /// A file holding the value, re-read on every fetch.
    File {
        /// Path to the secret file.
        path: PathBuf,
    },

    /// An environment variable, re-read on every fetch.
    Env {
        /// Variable name.
        var: String,
    },
}

impl Default for SecretBackend {
    fn default() -> Self {
        Self::Env {
            var: DEFAULT_SECRET_ENV_VAR.to_string(),
        }
    }
}

impl SecretBackend {
    /// Validate the backend configuration.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Memory { .. } => {},
            Self::File { path } => {
                if path.as_os_str().is_empty() {
                    return Err("file backend requires a path".to_string());
                }
            },
            Self::Env { var } => {
                if var.is_empty() {
                    return Err("env backend requires a variable name".to_string());
                }
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.restricted_path, "/restricted.html");
        assert_eq!(policy.override_param, "ipr");
        assert_eq!(policy.index_document, "index.html");
        assert_eq!(policy.store_timeout(), Duration::from_secs(3));
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_policy_validation() {
        let policy = PolicyConfig {
            restricted_path: "restricted.html".to_string(),
            ..Default::default()
        };
        assert!(policy.validate().unwrap_err().contains("restricted_path"));

        let policy = PolicyConfig {
            store_timeout_ms: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());

        let policy = PolicyConfig {
            override_param: String::new(),
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_backend_from_toml() {
        let config: AllowListConfig = toml::from_str(
            r#"
            table = "office-ips"
            [backend]
            type = "file"
            path = "/etc/edge-gate/allow.csv"
        "#,
        )
        .unwrap();
        assert_eq!(config.table, "office-ips");
        assert!(matches!(config.backend, AllowListBackend::File { .. }));

        let config: SecretConfig = toml::from_str(
            r#"
            [backend]
            type = "memory"
            [backend.parameters]
            "/develop/shared/restrict_flag" = "letmein"
        "#,
        )
        .unwrap();
        assert_eq!(config.parameter, DEFAULT_SECRET_PARAMETER);
        assert!(config.decrypt);
        match config.backend {
            SecretBackend::Memory { parameters } => {
                assert_eq!(
                    parameters.get(DEFAULT_SECRET_PARAMETER).map(String::as_str),
                    Some("letmein")
                );
            },
            other => panic!("unexpected backend: {other:?}"),
        }
    }

    #[test]
    fn test_backend_validation() {
        let backend = AllowListBackend::Memory {
            addresses: vec!["10.0.0.1".to_string(), String::new()],
        };
        assert!(backend.validate().is_err());

        let backend = SecretBackend::Env { var: String::new() };
        assert!(backend.validate().is_err());

        let config = SecretConfig {
            parameter: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
