//! Schedule generation error types.

use pricer_core::types::{Date, DateError};
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Maturity must fall strictly after the start date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Payment count is not a positive divisor of twelve months.
    #[error("Invalid frequency: {payments_per_year} payments per year")]
    InvalidFrequency {
        /// Requested number of payments per year.
        payments_per_year: i32,
    },

    /// Date arithmetic left the representable range.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },
}

impl From<DateError> for ScheduleError {
    fn from(err: DateError) -> Self {
        ScheduleError::DateOverflow {
            reason: err.to_string(),
        }
    }
}
