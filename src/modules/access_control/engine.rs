//! The access decision engine.
//!
//! Stages run in strict order and the first one to reach a verdict wins:
//!
//! ```text
//! asset? -> Pass
//! malformed address? -> Restrict
//! allow-listed? -> Pass      (lookup error -> Restrict)
//! override matches? -> Pass  (otherwise -> Restrict)
//! ```

use std::sync::Arc;
use tracing::{debug, warn};

use super::allow_list::{AllowListResolver, Resolution};
use super::classifier::{AssetClass, AssetClassifier};
use super::config::{AllowListConfig, PolicyConfig, SecretConfig};
use super::ip_encoder::AllowListKey;
use super::override_check::{OverrideChecker, OverrideOutcome};
use super::request::EdgeRequest;
use super::store::{AllowListStore, SecretStore};
use super::verdict::{DecisionReason, GateDecision, VerdictApplicator};
use crate::modules::logging::{Redactor, SharedRedactor};

/// Stateless decision engine shared by all in-flight requests.
#[derive(Debug)]
pub struct AccessDecisionEngine {
    classifier: AssetClassifier,
    resolver: AllowListResolver,
    checker: OverrideChecker,
    applicator: VerdictApplicator,
    redactor: SharedRedactor,
}

impl AccessDecisionEngine {
    /// Assemble an engine from configuration and already-built store clients.
    #[must_use]
    pub fn new(
        policy: &PolicyConfig,
        allow_list: &AllowListConfig,
        secret: &SecretConfig,
        allow_store: Arc<dyn AllowListStore>,
        secret_store: Arc<dyn SecretStore>,
    ) -> Self {
        let timeout = policy.store_timeout();

        Self {
            classifier: AssetClassifier::new(&policy.index_document),
            resolver: AllowListResolver::new(allow_store, &allow_list.table, timeout),
            checker: OverrideChecker::new(
                secret_store,
                &secret.parameter,
                &policy.override_param,
                timeout,
            )
            .with_decrypt(secret.decrypt),
            applicator: VerdictApplicator::new(&policy.restricted_path),
            redactor: Arc::new(Redactor::disabled()),
        }
    }

    /// Use `redactor` when logging query strings.
    #[must_use]
    pub fn with_redactor(mut self, redactor: SharedRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    /// Decide a request without modifying it.
    pub async fn decide(&self, request: &EdgeRequest) -> GateDecision {
        let reason = self.evaluate(request).await;
        let decision = GateDecision::from_reason(reason);

        debug!(
            client_ip = %request.client_ip,
            path = %request.path,
            query = %self.redactor.redact_query(&request.query),
            verdict = %decision.verdict,
            reason = %decision.reason,
            "access decision"
        );

        decision
    }

    /// Decide a request and apply the verdict to it.
    pub async fn handle(&self, request: EdgeRequest) -> (EdgeRequest, GateDecision) {
        let decision = self.decide(&request).await;
        (self.applicator.apply(decision.verdict, request), decision)
    }

    /// The applicator used on restrict.
    #[must_use]
    pub fn applicator(&self) -> &VerdictApplicator {
        &self.applicator
    }

    async fn evaluate(&self, request: &EdgeRequest) -> DecisionReason {
        if self.classifier.classify(&request.path) == AssetClass::Exempt {
            return DecisionReason::AssetExempt;
        }

        let key = match AllowListKey::from_address(&request.client_ip) {
            Ok(key) => key,
            Err(e) => {
                warn!(client_ip = %request.client_ip, error = %e, "rejecting malformed client address");
                return DecisionReason::MalformedAddress;
            },
        };

        match self.resolver.resolve(key).await {
            Resolution::Found => return DecisionReason::AllowListed,
            Resolution::StoreError(_) => return DecisionReason::AllowListUnavailable,
            Resolution::NotFound => {},
        }

        match self.checker.check(&request.query).await {
            OverrideOutcome::Accepted => DecisionReason::OverrideAccepted,
            OverrideOutcome::Missing => DecisionReason::OverrideMissing,
            OverrideOutcome::Mismatch(_) => DecisionReason::OverrideMismatch,
            OverrideOutcome::SecretUnavailable(_) => DecisionReason::SecretUnavailable,
        }
    }
}
