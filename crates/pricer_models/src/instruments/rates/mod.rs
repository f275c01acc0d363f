//! Interest rate instruments.
//!
//! - [`InterestRateSwap`]: fixed-for-floating swap, spot or forward starting
//! - [`EuropeanSwaption`]: single-exercise option on a swap, valued with Black
//! - [`BermudanSwaption`]: multi-exercise option on a swap, valued on a
//!   Hull-White trinomial lattice
//!
//! All three are wrapped in [`RatesInstrument`] for static dispatch.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::Date;
//! use pricer_models::instruments::rates::{RatesInstrument, SwapBuilder, SwapDirection};
//!
//! let swap = SwapBuilder::new()
//!     .start(Date::from_ymd(2025, 1, 2).unwrap())
//!     .maturity(Date::from_ymd(2030, 1, 2).unwrap())
//!     .fixed_rate(0.03)
//!     .direction(SwapDirection::PayFixed)
//!     .build::<f64>()
//!     .unwrap();
//!
//! let instrument: RatesInstrument = swap.into();
//! assert_eq!(instrument.type_name(), "Swap");
//! ```

pub mod pricing;
mod swap;
mod swaption;

pub use pricing::{
    fixed_leg_annuity, fixed_leg_pv, floating_leg_pv, price_bermudan_swaption,
    price_european_swaption, value_swap, SwapValuation, ValuationError,
};
pub use swap::{FixedLeg, FloatingLeg, InterestRateSwap, RateIndex, SwapBuilder, SwapDirection};
pub use swaption::{BermudanSwaption, EuropeanSwaption};

use pricer_core::market_data::YieldCurve;
use pricer_core::types::Date;

/// Rates instruments for static dispatch.
///
/// Lattice pricing is real-valued only, so the enum is fixed to `f64`.
#[derive(Debug, Clone)]
pub enum RatesInstrument {
    /// Fixed-for-floating interest rate swap.
    Swap(InterestRateSwap<f64>),
    /// European swaption.
    EuropeanSwaption(EuropeanSwaption<f64>),
    /// Bermudan swaption.
    BermudanSwaption(BermudanSwaption),
}

impl RatesInstrument {
    /// Display name used in reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            RatesInstrument::Swap(_) => "Swap",
            RatesInstrument::EuropeanSwaption(_) => "European Swaption",
            RatesInstrument::BermudanSwaption(_) => "Bermudan Swaption",
        }
    }

    /// The underlying swap (the instrument itself for a swap).
    pub fn underlying(&self) -> &InterestRateSwap<f64> {
        match self {
            RatesInstrument::Swap(swap) => swap,
            RatesInstrument::EuropeanSwaption(swaption) => swaption.underlying(),
            RatesInstrument::BermudanSwaption(swaption) => swaption.underlying(),
        }
    }

    /// Final maturity of the underlying swap.
    pub fn maturity_date(&self) -> Date {
        self.underlying().maturity_date()
    }

    /// Net present value against `curve`.
    pub fn value<C>(&self, curve: &C) -> Result<f64, ValuationError>
    where
        C: YieldCurve<f64> + ?Sized,
    {
        match self {
            RatesInstrument::Swap(swap) => Ok(value_swap(swap, curve)?.npv),
            RatesInstrument::EuropeanSwaption(swaption) => price_european_swaption(swaption, curve),
            RatesInstrument::BermudanSwaption(swaption) => price_bermudan_swaption(swaption, curve),
        }
    }

    /// Returns the swap if this is a swap.
    pub fn as_swap(&self) -> Option<&InterestRateSwap<f64>> {
        match self {
            RatesInstrument::Swap(swap) => Some(swap),
            _ => None,
        }
    }
}

impl From<InterestRateSwap<f64>> for RatesInstrument {
    fn from(swap: InterestRateSwap<f64>) -> Self {
        RatesInstrument::Swap(swap)
    }
}

impl From<EuropeanSwaption<f64>> for RatesInstrument {
    fn from(swaption: EuropeanSwaption<f64>) -> Self {
        RatesInstrument::EuropeanSwaption(swaption)
    }
}

impl From<BermudanSwaption> for RatesInstrument {
    fn from(swaption: BermudanSwaption) -> Self {
        RatesInstrument::BermudanSwaption(swaption)
    }
}
