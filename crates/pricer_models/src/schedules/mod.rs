//! Schedule generation for interest rate derivatives.
//!
//! - [`Schedule`]: contiguous accrual periods from start to maturity
//! - [`Period`]: a single accrual period with its payment date
//! - [`Frequency`]: month-based payment frequency
//! - [`ScheduleBuilder`]: builder that rolls boundaries on a holiday calendar
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .end(Date::from_ymd(2026, 1, 15).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .day_count(DayCountConvention::Actual360)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.periods().len(), 4);
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{Schedule, ScheduleBuilder};
