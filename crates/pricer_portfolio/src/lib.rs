//! # Pricer Portfolio (L4: Application)
//!
//! Prices a small rates portfolio against a curve bootstrapped from
//! market quotes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          pricer_portfolio (L4)          │
//! ├─────────────────────────────────────────┤
//! │  quotes        - parse and validate     │
//! │  orchestrator  - curve, instruments,    │
//! │                  valuation              │
//! │  parallel      - rayon helpers          │
//! │  report        - rows for presentation  │
//! └─────────────────────────────────────────┘
//!          ↓                     ↓
//! ┌──────────────────┐  ┌──────────────────┐
//! │ pricer_optimiser │  │  pricer_models   │
//! │ curve bootstrap  │  │ swaps, swaptions │
//! └──────────────────┘  └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_portfolio::{PortfolioConfig, PortfolioPricer};
//!
//! let pricer = PortfolioPricer::new(PortfolioConfig::default()).unwrap();
//! let report = pricer
//!     .price(Date::from_ymd(2025, 1, 2).unwrap(), &[5.0, 5.1, 5.2, 5.3, 5.4])
//!     .unwrap();
//! assert_eq!(report.rows.len(), 3);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod parallel;
pub mod quotes;
pub mod report;

pub use config::{ConfigError, PortfolioConfig};
pub use error::PortfolioError;
pub use orchestrator::PortfolioPricer;
pub use quotes::{parse_quotes, validate_quotes, BASELINE_QUOTES};
pub use report::{PortfolioReport, ReportRow};
