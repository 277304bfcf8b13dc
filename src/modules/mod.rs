//! # Gate Modules
//!
//! Built-in modules of the edge gate. The decision module implements the
//! [`crate::module::ModuleContract`] trait for uniform lifecycle management.
//!
//! ## Available Modules
//!
//! - [`access_control`] - IP allow-list gate with secret override and path rewrite
//! - [`logging`] - Structured logging setup and query-string redaction

pub mod access_control;
pub mod logging;
