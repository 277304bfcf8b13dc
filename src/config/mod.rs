//! # Configuration System
//!
//! TOML configuration for the edge gate: decision policy, allow-list and
//! secret store backends, and logging.
//!
//! ## Example Configuration
//!
//! ```toml
//! [gate]
//! name = "edge-gate"
//! restricted_path = "/restricted.html"
//! override_param = "ipr"
//!
//! [allow_list]
//! table = "restrict-ip-table"
//!
//! [allow_list.backend]
//! type = "file"
//! path = "allow-list.csv"
//!
//! [secret]
//! parameter = "/develop/shared/restrict_flag"
//!
//! [secret.backend]
//! type = "env"
//! var = "EDGE_GATE_RESTRICT_FLAG"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

mod error;
mod loader;
mod types;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use types::{GateConfig, LogFormat, LogLevel, LoggingConfig};
pub use validation::{
    BasicValidator, RestrictedPathValidator, ValidationError, ValidationResult,
    ValidationSeverity, Validator,
};
