//! Market data structures for rates pricing.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and the node-based [`DiscountCurve`](curves::DiscountCurve)
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{CurveInterpolation, DiscountCurve, YieldCurve};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let curve = DiscountCurve::new(
//!     today,
//!     DayCountConvention::Actual365Fixed,
//!     vec![today, Date::from_ymd(2025, 1, 2).unwrap()],
//!     vec![1.0, 0.95],
//!     CurveInterpolation::LogLinear,
//! )
//! .unwrap();
//! assert_eq!(curve.discount(today).unwrap(), 1.0);
//! ```

pub mod curves;
pub mod error;

pub use curves::{CurveInterpolation, DiscountCurve, YieldCurve};
pub use error::MarketDataError;
