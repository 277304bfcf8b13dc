//! Edge gate handler implementing ModuleContract.

use super::backends::{build_allow_list, build_secret_store};
use super::engine::AccessDecisionEngine;
use super::error::AccessControlResult;
use super::request::{EdgeEvent, EdgeRequest};
use super::store::{AllowListStore, SecretStore};
use super::verdict::{DecisionReason, GateDecision, VerdictApplicator};
use crate::config::GateConfig;
use crate::module::{
    Capability, MetricsPayload, ModuleConfig, ModuleContract, ModuleError, ModuleManifest,
    ModuleResult, ModuleStatus,
};
use crate::modules::logging::Redactor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Statistics for the gate.
#[derive(Debug, Default)]
pub struct GateStats {
    /// Total requests decided.
    pub requests_checked: AtomicU64,
    /// Requests forwarded unmodified.
    pub requests_passed: AtomicU64,
    /// Requests rewritten to the restricted path.
    pub requests_restricted: AtomicU64,
    /// Asset requests passed without a check.
    pub asset_exemptions: AtomicU64,
    /// Requests passed by the allow-list.
    pub allow_list_hits: AtomicU64,
    /// Requests passed by the override token.
    pub override_accepted: AtomicU64,
    /// Requests with a missing or wrong override token.
    pub override_rejected: AtomicU64,
    /// Requests with an unparseable client address.
    pub malformed_addresses: AtomicU64,
    /// Requests restricted because a store failed.
    pub store_errors: AtomicU64,
}

impl GateStats {
    /// Create new stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decision.
    pub fn record(&self, decision: &GateDecision) {
        self.requests_checked.fetch_add(1, Ordering::Relaxed);
        if decision.is_pass() {
            self.requests_passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_restricted.fetch_add(1, Ordering::Relaxed);
        }

        if decision.reason.is_store_failure() {
            self.store_errors.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let counter = match decision.reason {
            DecisionReason::AssetExempt => &self.asset_exemptions,
            DecisionReason::AllowListed => &self.allow_list_hits,
            DecisionReason::OverrideAccepted => &self.override_accepted,
            DecisionReason::OverrideMissing | DecisionReason::OverrideMismatch => {
                &self.override_rejected
            },
            DecisionReason::MalformedAddress => &self.malformed_addresses,
            DecisionReason::AllowListUnavailable
            | DecisionReason::SecretUnavailable
            | DecisionReason::GateNotRunning => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Store clients supplied by the embedder instead of the configured backends.
#[derive(Clone)]
struct InjectedStores {
    allow_list: Arc<dyn AllowListStore>,
    secret: Arc<dyn SecretStore>,
}

/// Edge gate module.
pub struct GateHandler {
    /// Configuration.
    config: GateConfig,

    /// Pre-built stores, used by `start()` when present.
    stores: Option<InjectedStores>,

    /// Decision engine, present while running.
    engine: Option<Arc<AccessDecisionEngine>>,

    /// Current status.
    status: ModuleStatus,

    /// Statistics.
    stats: Arc<GateStats>,

    /// Start time for uptime calculation.
    started_at: Option<Instant>,
}

impl std::fmt::Debug for GateHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateHandler")
            .field("config", &self.config)
            .field("injected_stores", &self.stores.is_some())
            .field("engine", &self.engine.is_some())
            .field("status", &self.status)
            .field("stats", &self.stats)
            .finish()
    }
}

impl GateHandler {
    /// Create a gate with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    /// Create a gate with a configuration. `init()` may still replace it.
    #[must_use]
    pub fn with_config(config: GateConfig) -> Self {
        Self {
            config,
            stores: None,
            engine: None,
            status: ModuleStatus::Stopped,
            stats: Arc::new(GateStats::new()),
            started_at: None,
        }
    }

    /// Use the given store clients instead of building the configured backends.
    #[must_use]
    pub fn with_stores(
        mut self,
        allow_list: Arc<dyn AllowListStore>,
        secret: Arc<dyn SecretStore>,
    ) -> Self {
        self.stores = Some(InjectedStores { allow_list, secret });
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Get statistics.
    #[must_use]
    pub fn stats(&self) -> &GateStats {
        &self.stats
    }

    /// Decide a request and apply the verdict.
    ///
    /// A gate that is not running restricts every request.
    pub async fn handle(&self, request: EdgeRequest) -> (EdgeRequest, GateDecision) {
        let (request, decision) = match self.engine.clone() {
            Some(engine) => engine.handle(request).await,
            None => {
                error!(
                    status = %self.status,
                    client_ip = %request.client_ip,
                    "request received while gate is not running"
                );
                let decision = GateDecision::from_reason(DecisionReason::GateNotRunning);
                let applicator = VerdictApplicator::new(&self.config.gate.restricted_path);
                (applicator.apply(decision.verdict, request), decision)
            },
        };

        self.stats.record(&decision);
        (request, decision)
    }

    /// Decide the request carried by an edge event.
    ///
    /// # Errors
    ///
    /// Returns `AccessControlError::MalformedInput` if the event holds no request.
    pub async fn handle_event(&self, event: EdgeEvent) -> AccessControlResult<EdgeRequest> {
        let request = event.into_request()?;
        Ok(self.handle(request).await.0)
    }

    fn build_engine(&self) -> ModuleResult<AccessDecisionEngine> {
        let stores = match &self.stores {
            Some(stores) => stores.clone(),
            None => InjectedStores {
                allow_list: build_allow_list(&self.config.allow_list.backend).map_err(|e| {
                    ModuleError::StartFailed(format!("failed to build allow-list store: {e}"))
                })?,
                secret: build_secret_store(&self.config.secret.backend),
            },
        };

        let mut masked = self.config.logging.redact_params.clone();
        if !masked.contains(&self.config.gate.override_param) {
            masked.push(self.config.gate.override_param.clone());
        }
        let redactor = Redactor::new(masked)
            .map_err(|e| ModuleError::StartFailed(format!("failed to build redactor: {e}")))?;

        debug!(
            allow_list = stores.allow_list.name(),
            secret = stores.secret.name(),
            "gate stores ready"
        );

        Ok(AccessDecisionEngine::new(
            &self.config.gate,
            &self.config.allow_list,
            &self.config.secret,
            stores.allow_list,
            stores.secret,
        )
        .with_redactor(Arc::new(redactor)))
    }
}

impl Default for GateHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleContract for GateHandler {
    fn manifest(&self) -> ModuleManifest {
        ModuleManifest::builder(&self.config.gate.name)
            .description("IP allow-list gate with secret override for edge requests")
            .version(0, 1, 0)
            .capability(Capability::RequestInterception)
            .capability(Capability::AccessControl)
            .capability(Capability::Metrics)
            .build()
    }

    fn init(&mut self, config: ModuleConfig) -> ModuleResult<()> {
        if !self.status.is_stopped() {
            return Err(ModuleError::InvalidState {
                current: self.status.to_string(),
                expected: "Stopped".to_string(),
            });
        }

        info!("Initializing edge gate");

        if let Some(raw) = config.raw_config() {
            self.config = toml::from_str(raw)
                .map_err(|e| ModuleError::ConfigError(format!("failed to parse config: {e}")))?;
        }

        self.config.validate().map_err(ModuleError::ConfigError)?;

        self.status = ModuleStatus::Initializing;
        info!(name = %self.config.gate.name, "Edge gate initialized");
        Ok(())
    }

    fn start(&mut self) -> ModuleResult<()> {
        if self.status != ModuleStatus::Initializing {
            return Err(ModuleError::InvalidState {
                current: self.status.to_string(),
                expected: "Initializing".to_string(),
            });
        }

        debug!("Starting edge gate");

        let engine = match self.build_engine() {
            Ok(engine) => engine,
            Err(e) => {
                self.status = ModuleStatus::Error {
                    message: e.to_string(),
                };
                return Err(e);
            },
        };
        self.engine = Some(Arc::new(engine));

        self.status = ModuleStatus::Running;
        self.started_at = Some(Instant::now());

        info!(
            restricted_path = %self.config.gate.restricted_path,
            table = %self.config.allow_list.table,
            "Edge gate started"
        );
        Ok(())
    }

    fn stop(&mut self) -> ModuleResult<()> {
        debug!("Stopping edge gate");

        self.engine = None;
        self.status = ModuleStatus::Stopped;
        self.started_at = None;

        info!("Edge gate stopped");
        Ok(())
    }

    fn status(&self) -> ModuleStatus {
        self.status.clone()
    }

    fn metrics(&self) -> MetricsPayload {
        let mut metrics = MetricsPayload::new();
        let stats = &self.stats;

        for (name, counter) in [
            ("requests_checked", &stats.requests_checked),
            ("requests_passed", &stats.requests_passed),
            ("requests_restricted", &stats.requests_restricted),
            ("asset_exemptions", &stats.asset_exemptions),
            ("allow_list_hits", &stats.allow_list_hits),
            ("override_accepted", &stats.override_accepted),
            ("override_rejected", &stats.override_rejected),
            ("malformed_addresses", &stats.malformed_addresses),
            ("store_errors", &stats.store_errors),
        ] {
            metrics.counter(name, counter.load(Ordering::Relaxed));
        }

        if let Some(started) = self.started_at {
            metrics.gauge("uptime_secs", started.elapsed().as_secs_f64());
        }

        metrics
    }
}
