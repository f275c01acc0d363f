//! Errors raised while building or evaluating a short-rate lattice.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{Date, PricingError};
use thiserror::Error;

/// Lattice construction and calibration errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Mean reversion must be positive and finite.
    #[error("Invalid mean reversion: a = {0}")]
    InvalidMeanReversion(f64),

    /// Short-rate volatility must be positive and finite.
    #[error("Invalid short-rate volatility: σ = {0}")]
    InvalidVolatility(f64),

    /// Conditional variance over a step is not positive.
    #[error("Non-positive variance {variance} at step {step}")]
    NonPositiveVariance {
        /// Step index.
        step: usize,
        /// Offending variance.
        variance: f64,
    },

    /// Exercise date precedes the valuation date.
    #[error("Exercise date {date} is before valuation date {valuation}")]
    ExerciseBeforeValuation {
        /// Exercise date.
        date: Date,
        /// Valuation date.
        valuation: Date,
    },

    /// Exercise date is not an accrual start of the fixed leg.
    #[error("Exercise date {0} is not a fixed-leg accrual boundary")]
    ExerciseNotOnSchedule(Date),

    /// No exercise dates were supplied.
    #[error("Bermudan swaption requires at least one exercise date")]
    NoExerciseDates,

    /// Arrow-Debreu prices sum to a non-positive or non-finite value.
    #[error("Degenerate state prices at step {step}: sum = {sum}")]
    DegenerateStatePrices {
        /// Step index.
        step: usize,
        /// Sum of discounted state prices.
        sum: f64,
    },

    /// Time grid would need more steps than allowed.
    #[error("Time grid needs {steps} steps, maximum is {max}")]
    TooManySteps {
        /// Steps required.
        steps: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Lattice horizon is not a positive finite time.
    #[error("Invalid lattice horizon: t = {0}")]
    InvalidHorizon(f64),

    /// Lattice settings are inconsistent.
    #[error("Invalid lattice configuration: {0}")]
    InvalidConfig(String),

    /// Discount curve lookup failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::NonPositiveVariance { .. } | LatticeError::DegenerateStatePrices { .. } => {
                PricingError::ModelFailure(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LatticeError::TooManySteps {
            steps: 2500,
            max: 2000,
        };
        assert_eq!(err.to_string(), "Time grid needs 2500 steps, maximum is 2000");
        assert_eq!(
            LatticeError::InvalidMeanReversion(-0.1).to_string(),
            "Invalid mean reversion: a = -0.1"
        );
    }

    #[test]
    fn test_pricing_error_mapping() {
        let err: PricingError = LatticeError::DegenerateStatePrices { step: 3, sum: 0.0 }.into();
        assert!(matches!(err, PricingError::ModelFailure(_)));
        let err: PricingError = LatticeError::InvalidVolatility(0.0).into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
