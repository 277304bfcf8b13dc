//! The core Module Contract trait.

use super::{ModuleConfig, ModuleManifest, ModuleResult, ModuleStatus};
use std::collections::BTreeMap;

/// Metrics payload containing module-specific metrics.
#[derive(Debug, Clone, Default)]
pub struct MetricsPayload {
    /// Counter metrics (monotonically increasing).
    pub counters: BTreeMap<String, u64>,

    /// Gauge metrics (can go up and down).
    pub gauges: BTreeMap<String, f64>,
}

impl MetricsPayload {
    /// Creates a new empty metrics payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a counter metric.
    pub fn counter(&mut self, name: impl Into<String>, value: u64) {
        self.counters.insert(name.into(), value);
    }

    /// Adds a gauge metric.
    pub fn gauge(&mut self, name: impl Into<String>, value: f64) {
        self.gauges.insert(name.into(), value);
    }

    /// Formats metrics in Prometheus text format, sorted by name.
    #[must_use]
    pub fn to_prometheus(&self, prefix: &str) -> String {
        let mut output = String::new();

        for (name, value) in &self.counters {
            output.push_str(&format!("{prefix}_{name} {value}\n"));
        }

        for (name, value) in &self.gauges {
            output.push_str(&format!("{prefix}_{name} {value}\n"));
        }

        output
    }
}

/// Lifecycle contract implemented by the gate module.
///
/// # Lifecycle
///
/// 1. `manifest()` - identity and capabilities
/// 2. `init()` - accept and validate configuration
/// 3. `start()` - connect stores, begin deciding requests
/// 4. `status()` / `metrics()` - ongoing monitoring
/// 5. `stop()` - release store clients
pub trait ModuleContract: Send + Sync {
    /// Returns the module's manifest describing its identity and capabilities.
    fn manifest(&self) -> ModuleManifest;

    /// Initializes the module with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::ConfigError` if the configuration is invalid and
    /// `ModuleError::InvalidState` if the module is not stopped.
    fn init(&mut self, config: ModuleConfig) -> ModuleResult<()>;

    /// Starts the module.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::StartFailed` if a store backend cannot be built,
    /// `ModuleError::InvalidState` if called before `init()`.
    fn start(&mut self) -> ModuleResult<()>;

    /// Stops the module and releases its resources.
    ///
    /// # Errors
    ///
    /// Implementations may refuse to stop from unexpected states.
    fn stop(&mut self) -> ModuleResult<()>;

    /// Returns the current status of the module.
    fn status(&self) -> ModuleStatus;

    /// Returns the current metrics from the module.
    fn metrics(&self) -> MetricsPayload;

    /// Liveness check. Defaults to "is running".
    fn heartbeat(&self) -> bool {
        self.status().is_healthy()
    }
}
