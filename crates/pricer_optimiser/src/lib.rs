//! # pricer_optimiser
//!
//! Curve calibration for the rates pricer.
//!
//! This crate sits between Models (L2) and the portfolio layer, solving the
//! inverse problem of turning market quotes into a discount curve.
//!
//! ## Modules
//!
//! - `bootstrapping`: discount curve stripping from deposit quotes
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_optimiser::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 1, 2).unwrap();
//! let quotes = DepositQuote::<f64>::from_percentages(&[5.0, 5.1, 5.2]);
//! let curve = DepositBootstrapper::with_defaults()
//!     .bootstrap(valuation, &quotes)
//!     .unwrap()
//!     .curve;
//! assert_eq!(curve.node_count(), 4);
//! ```

pub mod bootstrapping;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrapping::*;
}
