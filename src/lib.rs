//! # Edge Gate
//!
//! An edge access-control gate that decides, for each inbound page request,
//! whether it reaches the origin unchanged or is rewritten to a restricted
//! page.
//!
//! ## Features
//!
//! - Asset exemption for non-page paths
//! - IPv4 allow-list backed by a key-value table
//! - Secret override via a query parameter
//! - Fail-closed on every store error or timeout
//! - Prometheus-compatible metrics
//!
//! ## Architecture
//!
//! The gate is packaged as a module implementing the [`module::ModuleContract`]
//! trait for uniform lifecycle management. Decisions are made by
//! [`modules::access_control::AccessDecisionEngine`], which talks to its
//! stores only through the [`modules::access_control::AllowListStore`] and
//! [`modules::access_control::SecretStore`] traits.

pub mod config;
pub mod module;
pub mod modules;
