//! Options to enter an interest rate swap.
//!
//! - [`EuropeanSwaption`]: single exercise date, flat lognormal volatility
//! - [`BermudanSwaption`]: several exercise dates on fixed-leg accrual
//!   starts, valued on a Hull-White lattice
//!
//! Payer or receiver follows the direction of the underlying swap.

use num_traits::Float;
use pricer_core::types::Date;

use super::swap::{InterestRateSwap, SwapDirection};
use crate::instruments::InstrumentError;
use crate::models::rates::{HullWhiteParams, LatticeConfig, LatticeError};

/// European swaption priced with Black's formula.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::{EuropeanSwaption, SwapBuilder};
/// use pricer_core::types::Date;
///
/// let underlying = SwapBuilder::new()
///     .start(Date::from_ymd(2026, 1, 2).unwrap())
///     .maturity(Date::from_ymd(2030, 1, 2).unwrap())
///     .fixed_rate(0.03)
///     .build::<f64>()
///     .unwrap();
///
/// let swaption = EuropeanSwaption::new(
///     underlying,
///     Date::from_ymd(2026, 1, 2).unwrap(),
///     0.01,
/// )
/// .unwrap();
/// assert!(swaption.is_payer());
/// ```
#[derive(Debug, Clone)]
pub struct EuropeanSwaption<T: Float> {
    underlying: InterestRateSwap<T>,
    exercise_date: Date,
    volatility: T,
}

impl<T: Float> EuropeanSwaption<T> {
    /// Creates a European swaption.
    ///
    /// # Errors
    ///
    /// - `InvalidVolatility` if volatility is negative or not finite
    /// - `ExerciseAfterStart` if exercise falls after the underlying start
    pub fn new(
        underlying: InterestRateSwap<T>,
        exercise_date: Date,
        volatility: T,
    ) -> Result<Self, InstrumentError> {
        if !(volatility >= T::zero()) || !volatility.is_finite() {
            return Err(InstrumentError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        let start = underlying.start_date();
        if exercise_date > start {
            return Err(InstrumentError::ExerciseAfterStart {
                exercise: exercise_date,
                start,
            });
        }
        Ok(Self {
            underlying,
            exercise_date,
            volatility,
        })
    }

    /// The swap entered on exercise.
    #[inline]
    pub fn underlying(&self) -> &InterestRateSwap<T> {
        &self.underlying
    }

    /// Exercise date.
    #[inline]
    pub fn exercise_date(&self) -> Date {
        self.exercise_date
    }

    /// Lognormal volatility of the forward swap rate.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Strike, the fixed rate of the underlying.
    #[inline]
    pub fn strike(&self) -> T {
        self.underlying.fixed_rate()
    }

    /// True for the right to pay fixed.
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.underlying.direction() == SwapDirection::PayFixed
    }
}

/// Bermudan swaption on a Hull-White trinomial lattice.
///
/// Exercise dates must be accrual start dates of the underlying fixed leg.
/// On exercise the holder enters the periods of the underlying that start
/// on or after the exercise date.
#[derive(Debug, Clone)]
pub struct BermudanSwaption {
    underlying: InterestRateSwap<f64>,
    exercise_dates: Vec<Date>,
    model: HullWhiteParams,
    lattice: LatticeConfig,
}

impl BermudanSwaption {
    /// Creates a Bermudan swaption; exercise dates are sorted and
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// - `NoExerciseDates` for an empty exercise set
    /// - `ExerciseNotOnSchedule` for a date that is not a fixed accrual start
    /// - model or lattice validation errors
    pub fn new(
        underlying: InterestRateSwap<f64>,
        mut exercise_dates: Vec<Date>,
        model: HullWhiteParams,
        lattice: LatticeConfig,
    ) -> Result<Self, LatticeError> {
        model.validate()?;
        lattice.validate()?;

        exercise_dates.sort();
        exercise_dates.dedup();
        if exercise_dates.is_empty() {
            return Err(LatticeError::NoExerciseDates);
        }

        let boundaries = underlying.fixed_leg().schedule().accrual_start_dates();
        if let Some(&date) = exercise_dates
            .iter()
            .find(|d| boundaries.binary_search(d).is_err())
        {
            return Err(LatticeError::ExerciseNotOnSchedule(date));
        }

        Ok(Self {
            underlying,
            exercise_dates,
            model,
            lattice,
        })
    }

    /// The swap entered on exercise.
    #[inline]
    pub fn underlying(&self) -> &InterestRateSwap<f64> {
        &self.underlying
    }

    /// Sorted exercise dates.
    #[inline]
    pub fn exercise_dates(&self) -> &[Date] {
        &self.exercise_dates
    }

    /// Hull-White parameters.
    #[inline]
    pub fn model(&self) -> &HullWhiteParams {
        &self.model
    }

    /// Lattice settings.
    #[inline]
    pub fn lattice(&self) -> &LatticeConfig {
        &self.lattice
    }

    /// True for the right to pay fixed.
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.underlying.direction() == SwapDirection::PayFixed
    }
}
