//! Core time, calendar, and error types.
//!
//! This module provides:
//! - `time`: Date, DayCountConvention, BusinessDayConvention
//! - `calendar`: Holiday calendars for business day rolling
//! - `error`: Structured error types for pricing, date, and convention parsing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod calendar;
pub mod error;
pub mod time;

pub use calendar::Calendar;
pub use error::{ConventionError, DateError, PricingError};
pub use time::{BusinessDayConvention, Date, DayCountConvention};
