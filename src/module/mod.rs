//! # Module Contract
//!
//! Lifecycle contract for the gate. The decision engine is wrapped in a
//! module that is initialised from configuration, started (which builds the
//! store clients once), queried for status and metrics, and stopped.

mod config;
mod contract;
mod error;
mod manifest;
mod status;

pub use config::ModuleConfig;
pub use contract::{MetricsPayload, ModuleContract};
pub use error::{ModuleError, ModuleResult};
pub use manifest::{Capability, ModuleManifest, SemVer};
pub use status::ModuleStatus;
