//! Verdicts, decision reasons, and applying a verdict to a request.

use super::request::EdgeRequest;

/// The gate's binary outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Forward the request unmodified.
    Pass,
    /// Rewrite the request path to the restricted resource.
    Restrict,
}

impl Verdict {
    /// Returns `true` for `Pass`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Restrict => write!(f, "restrict"),
        }
    }
}

/// Why a verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Path is a non-page asset.
    AssetExempt,
    /// Client address has an allow-list record.
    AllowListed,
    /// Override token matched the secret.
    OverrideAccepted,
    /// Client address is not a canonical IPv4 dotted quad.
    MalformedAddress,
    /// Allow-list lookup failed.
    AllowListUnavailable,
    /// No usable override token in the query.
    OverrideMissing,
    /// Secret fetch failed.
    SecretUnavailable,
    /// Override token did not match.
    OverrideMismatch,
    /// The gate was asked to decide before it started.
    GateNotRunning,
}

impl DecisionReason {
    /// The verdict this reason implies.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::AssetExempt | Self::AllowListed | Self::OverrideAccepted => Verdict::Pass,
            Self::MalformedAddress
            | Self::AllowListUnavailable
            | Self::OverrideMissing
            | Self::SecretUnavailable
            | Self::OverrideMismatch
            | Self::GateNotRunning => Verdict::Restrict,
        }
    }

    /// Returns `true` if a dependency failure, not the request, caused the verdict.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::AllowListUnavailable | Self::SecretUnavailable)
    }

    /// Short snake_case label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetExempt => "asset_exempt",
            Self::AllowListed => "allow_listed",
            Self::OverrideAccepted => "override_accepted",
            Self::MalformedAddress => "malformed_address",
            Self::AllowListUnavailable => "allow_list_unavailable",
            Self::OverrideMissing => "override_missing",
            Self::SecretUnavailable => "secret_unavailable",
            Self::OverrideMismatch => "override_mismatch",
            Self::GateNotRunning => "gate_not_running",
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verdict together with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Pass or restrict.
    pub verdict: Verdict,
    /// What produced it.
    pub reason: DecisionReason,
}

impl GateDecision {
    /// Build the decision implied by `reason`.
    #[must_use]
    pub fn from_reason(reason: DecisionReason) -> Self {
        Self {
            verdict: reason.verdict(),
            reason,
        }
    }

    /// Returns `true` if the request passes.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// Writes a verdict into a request.
#[derive(Debug, Clone)]
pub struct VerdictApplicator {
    restricted_path: String,
}

impl VerdictApplicator {
    /// Create an applicator rewriting to `restricted_path`.
    #[must_use]
    pub fn new(restricted_path: impl Into<String>) -> Self {
        Self {
            restricted_path: restricted_path.into(),
        }
    }

    /// The path written on restrict.
    #[must_use]
    pub fn restricted_path(&self) -> &str {
        &self.restricted_path
    }

    /// Apply `verdict`: pass returns the request as is, restrict replaces
    /// only its path.
    #[must_use]
    pub fn apply(&self, verdict: Verdict, mut request: EdgeRequest) -> EdgeRequest {
        if verdict == Verdict::Restrict {
            request.path.clone_from(&self.restricted_path);
        }
        request
    }
}

impl Default for VerdictApplicator {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_RESTRICTED_PATH)
    }
}
