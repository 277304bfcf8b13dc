//! # Access Control Module
//!
//! Edge gate deciding whether a page request reaches its origin or is
//! rewritten to a restricted page.
//!
//! ## Decision order
//!
//! - **Asset exemption**: paths that name a file other than the index document
//!   pass untouched
//! - **Allow-list**: the client IPv4 address, encoded as a 32-bit key, is
//!   looked up in a key-value table; a hit passes
//! - **Secret override**: a query parameter (`ipr`) equal to a shared secret
//!   passes
//! - Everything else, including every store failure, is restricted
//!
//! ## Usage
//!
//! ```ignore
//! use edge_gate::modules::access_control::{EdgeRequest, GateHandler};
//! use edge_gate::module::{ModuleConfig, ModuleContract};
//!
//! let mut gate = GateHandler::new();
//! gate.init(ModuleConfig::from_raw(toml))?;
//! gate.start()?;
//!
//! let (request, decision) = gate.handle(EdgeRequest::new("8.8.8.8", "/", "")).await;
//! assert_eq!(request.path, "/restricted.html");
//! ```

mod allow_list;
mod backends;
mod classifier;
mod config;
mod engine;
mod error;
mod handler;
mod ip_encoder;
mod override_check;
mod query;
mod request;
mod store;
mod verdict;

pub use allow_list::{AllowListResolver, Resolution};
pub use backends::{
    build_allow_list, build_secret_store, parse_address_list, AddressListEntry, EnvSecretStore,
    FileAllowList, FileSecretStore,
};
pub use classifier::{AssetClass, AssetClassifier};
pub use config::{
    AllowListBackend, AllowListConfig, PolicyConfig, SecretBackend, SecretConfig,
    DEFAULT_INDEX_DOCUMENT, DEFAULT_OVERRIDE_PARAM, DEFAULT_RESTRICTED_PATH,
    DEFAULT_SECRET_ENV_VAR, DEFAULT_SECRET_PARAMETER, DEFAULT_TABLE,
};
pub use engine::AccessDecisionEngine;
pub use error::{AccessControlError, AccessControlResult};
pub use handler::{GateHandler, GateStats};
pub use ip_encoder::{encode_ipv4, AllowListKey};
pub use override_check::{OverrideChecker, OverrideOutcome};
pub use query::{decode_component, ParamLookup, QueryParams};
pub use request::{EdgeEvent, EdgePayload, EdgeRecord, EdgeRequest};
pub use store::{
    bounded, AllowListRecord, AllowListStore, MemoryAllowList, MemorySecretStore, SecretStore,
    StoreError, StoreResult,
};
pub use verdict::{DecisionReason, GateDecision, Verdict, VerdictApplicator};
