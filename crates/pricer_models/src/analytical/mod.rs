//! Closed-form option formulas.
//!
//! - [`Black76`]: lognormal forward model used for European swaptions
//! - [`norm_cdf`] / [`norm_pdf`]: standard normal distribution
//!
//! Generic over `T: Float` so the same code serves `f64` and `f32` callers.

pub mod black76;
pub mod distributions;
pub mod error;

pub use black76::{Black76, MIN_TOTAL_VOLATILITY};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
