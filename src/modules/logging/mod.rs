//! # Logging
//!
//! Structured logging for the gate: `tracing` subscriber setup driven by
//! `[logging]` configuration, and redaction of override tokens from query
//! strings before they are written to logs.

pub mod error;
pub mod redaction;
pub mod subscriber;

pub use error::{LogError, LogResult};
pub use redaction::{Redactor, SharedRedactor, DEFAULT_REPLACEMENT};
pub use subscriber::{build_filter, init_logging};
