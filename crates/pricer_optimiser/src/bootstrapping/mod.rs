//! Discount curve bootstrapping from deposit quotes.
//!
//! - [`DepositQuote`]: simply compounded rate to a whole-year maturity
//! - [`BootstrapConfig`]: conventions and node checks
//! - [`DepositBootstrapper`]: sequential stripping into a
//!   [`DiscountCurve`](pricer_core::market_data::DiscountCurve)

mod config;
mod engine;
mod error;
mod instrument;

pub use config::BootstrapConfig;
pub use engine::{BootstrapResult, DepositBootstrapper};
pub use error::BootstrapError;
pub use instrument::DepositQuote;
