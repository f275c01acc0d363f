//! Curve abstractions for interest rate calculations.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`DiscountCurve`]: Dated discount-factor nodes with interpolation
//! - [`CurveInterpolation`]: Interpolation method selection

mod discount;
mod traits;

pub use discount::{CurveInterpolation, DiscountCurve};
pub use traits::YieldCurve;
