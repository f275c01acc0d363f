//! Hull-White one-factor short-rate model and its trinomial lattice.
//!
//! - [`HullWhiteParams`]: mean reversion and volatility
//! - [`LatticeConfig`] / [`TimeGrid`]: discretisation in curve time
//! - [`HullWhiteTree`]: curve-fitted trinomial tree with backward induction
//! - [`LatticeError`]: construction and calibration failures

mod error;
mod hull_white;
mod time_grid;
mod trinomial;

pub use error::LatticeError;
pub use hull_white::HullWhiteParams;
pub use time_grid::{LatticeConfig, TimeGrid, TIME_TOLERANCE};
pub use trinomial::HullWhiteTree;
