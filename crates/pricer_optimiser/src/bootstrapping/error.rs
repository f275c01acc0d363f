//! Bootstrap-specific error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{Date, DateError, PricingError};
use thiserror::Error;

/// Errors that can occur during curve bootstrapping.
///
/// # Examples
///
/// ```
/// use pricer_optimiser::bootstrapping::BootstrapError;
///
/// let err = BootstrapError::InvalidRate { index: 2, rate: f64::NAN };
/// assert!(format!("{}", err).contains("quote 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Not enough quotes to build a curve.
    #[error("Insufficient quotes: need at least {required}, got {provided}")]
    InsufficientData {
        /// Minimum number of quotes required
        required: usize,
        /// Number of quotes provided
        provided: usize,
    },

    /// Quote maturities are not strictly increasing.
    #[error("Quote {index} maturity of {years}Y does not follow the previous quote")]
    NonIncreasingMaturity {
        /// Position of the offending quote
        index: usize,
        /// Its maturity in years
        years: u32,
    },

    /// Quote rate is not finite or is at or below -100%.
    #[error("Invalid rate for quote {index}: {rate}")]
    InvalidRate {
        /// Position of the offending quote
        index: usize,
        /// The rate as a decimal
        rate: f64,
    },

    /// A quote implies a non-positive discount factor.
    #[error("Non-positive discount factor {df} at {maturity}")]
    NonPositiveDiscountFactor {
        /// Node date
        maturity: Date,
        /// Implied discount factor
        df: f64,
    },

    /// Discount factors increase between consecutive nodes.
    #[error("Negative forward rate: discount factor rises from {previous} to {current} at {maturity}")]
    NegativeForward {
        /// Node date where the discount factor rose
        maturity: Date,
        /// Discount factor at the previous node
        previous: f64,
        /// Discount factor at this node
        current: f64,
    },

    /// Maturity date could not be computed.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Curve construction rejected the nodes.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl From<BootstrapError> for PricingError {
    fn from(err: BootstrapError) -> Self {
        match err {
            BootstrapError::InsufficientData { .. }
            | BootstrapError::NonIncreasingMaturity { .. }
            | BootstrapError::InvalidRate { .. } => PricingError::InvalidInput(err.to_string()),
            _ => PricingError::ModelFailure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BootstrapError::InsufficientData {
            required: 1,
            provided: 0,
        };
        assert_eq!(
            format!("{}", err),
            "Insufficient quotes: need at least 1, got 0"
        );

        let err = BootstrapError::NonIncreasingMaturity { index: 3, years: 2 };
        assert!(format!("{}", err).contains("2Y"));
    }

    #[test]
    fn test_from_market_data_error() {
        let err: BootstrapError = MarketDataError::UnsortedNodes { index: 1 }.into();
        assert!(matches!(err, BootstrapError::MarketData(_)));
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = BootstrapError::InvalidRate {
            index: 0,
            rate: -2.0,
        }
        .into();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let maturity = Date::from_ymd(2026, 1, 2).unwrap();
        let err: PricingError = BootstrapError::NegativeForward {
            maturity,
            previous: 0.95,
            current: 0.96,
        }
        .into();
        assert!(matches!(err, PricingError::ModelFailure(_)));
    }
}
