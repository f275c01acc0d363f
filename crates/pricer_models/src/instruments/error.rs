//! Instrument construction errors.

use pricer_core::types::{Date, PricingError};
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Instrument-related errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidNotional { notional: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Notional must be positive and finite.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// A rate (fixed rate or spread) is not finite.
    #[error("Invalid {name}: {value}")]
    InvalidRate {
        /// Which rate
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Option volatility must be non-negative and finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Exercise falls after the start of the underlying swap.
    #[error("Exercise date {exercise} is after underlying start {start}")]
    ExerciseAfterStart {
        /// Exercise date
        exercise: Date,
        /// Underlying accrual start
        start: Date,
    },

    /// Leg schedule could not be generated.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
