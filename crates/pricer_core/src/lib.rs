//! # pricer_core: Foundation types for the rates pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention`, `BusinessDayConvention` (`types::time`)
//! - Holiday calendars: `Calendar` (`types::calendar`)
//! - Error types: `PricingError`, `DateError`, `ConventionError` (`types::error`)
//! - Market data: the `YieldCurve` trait and `DiscountCurve` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let year_fraction = DayCountConvention::Actual360.year_fraction_dates(start, end);
//! assert!(year_fraction > 0.5);
//!
//! let rolled = BusinessDayConvention::ModifiedFollowing
//!     .adjust(start, Calendar::UnitedStatesSettlement)
//!     .unwrap();
//! assert_eq!(rolled, Date::from_ymd(2024, 1, 2).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, conventions, calendars and interpolation

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
