//! Market data error types.
//!
//! Structured errors for discount curve construction and lookups.

use crate::types::{Date, PricingError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative or non-finite time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Query date precedes the curve reference date.
    #[error("Date {date} is before curve reference date {reference}")]
    DateBeforeReference {
        /// Queried date
        date: Date,
        /// Curve reference (valuation) date
        reference: Date,
    },

    /// A curve node carries a non-positive or non-finite discount factor.
    #[error("Discount factor at node {index} must be positive and finite, got {df}")]
    InvalidDiscountFactor {
        /// Node index
        index: usize,
        /// Offending discount factor
        df: f64,
    },

    /// Curve node dates are not strictly increasing.
    #[error("Curve node dates must be strictly increasing (at index {index})")]
    UnsortedNodes {
        /// Index of the first out-of-order node
        index: usize,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
