//! HTTP surface for the rates portfolio pricer.
//!
//! Serves an HTML blotter (`/`) where curve quotes can be edited and the
//! portfolio repriced, a JSON endpoint (`/api/v1/portfolio`) with the same
//! semantics, and health probes.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use pricer_core;
pub use pricer_portfolio;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
