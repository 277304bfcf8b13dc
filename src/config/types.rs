//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::modules::access_control::{AllowListConfig, PolicyConfig, SecretConfig};

/// Root configuration structure for the edge gate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Decision policy.
    pub gate: PolicyConfig,

    /// Allow-list store.
    pub allow_list: AllowListConfig,

    /// Override secret store.
    pub secret: SecretConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl GateConfig {
    /// Validate every section, returning the first error.
    pub fn validate(&self) -> Result<(), String> {
        self.gate.validate()?;
        self.allow_list.validate()?;
        self.secret.validate()?;
        self.logging.validate()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: LogLevel,

    /// Log format (json, pretty, compact).
    pub format: LogFormat,

    /// Query parameters whose values are masked in logs.
    pub redact_params: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            redact_params: vec!["ipr".to_string()],
        }
    }
}

impl LoggingConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.redact_params.iter().any(String::is_empty) {
            return Err("logging.redact_params cannot contain empty names".to_string());
        }
        Ok(())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose).
    Trace,
    /// Debug level.
    Debug,
    /// Info level (default).
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level (least verbose).
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable).
    Json,
    /// Multi-line human format (default).
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
}
