//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from instrument valuation
//! - `DateError`: Errors from date construction, parsing and arithmetic
//! - `ConventionError`: Errors from parsing conventions and calendars

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Umbrella error for valuation routines. Layer-specific errors
/// (market data, analytical formulas, lattices) convert into it so that
/// instrument dispatch can return a single error type.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation produced a non-finite or unusable value
/// - `ModelFailure`: Model could not be built or fitted
/// - `UnsupportedInstrument`: Instrument type not supported by the engine
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("negative notional".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: negative notional");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),

    /// Instrument type not supported
    UnsupportedInstrument(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
            PricingError::UnsupportedInstrument(msg) => {
                write!(f, "Unsupported instrument: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),

    /// Date arithmetic left the representable range.
    Overflow(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
            DateError::Overflow(msg) => write!(f, "Date overflow: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Errors raised when parsing conventions from text (configuration files,
/// command line, HTTP payloads).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConventionError {
    /// Unknown day count convention name.
    #[error("Unknown day count convention: {0}")]
    UnknownDayCount(String),

    /// Unknown business day convention name.
    #[error("Unknown business day convention: {0}")]
    UnknownBusinessDayConvention(String),

    /// Unknown holiday calendar name.
    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),
}
