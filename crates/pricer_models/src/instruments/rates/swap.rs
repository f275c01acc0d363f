//! Fixed-for-floating interest rate swap.
//!
//! A swap exchanges a fixed leg against a floating leg on a common
//! notional. Legs carry their own schedules, so the fixed and floating
//! sides may pay at different frequencies and day counts.
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::rates::{SwapBuilder, SwapDirection};
//! use pricer_core::types::Date;
//!
//! let swap = SwapBuilder::new()
//!     .start(Date::from_ymd(2025, 1, 2).unwrap())
//!     .maturity(Date::from_ymd(2030, 1, 2).unwrap())
//!     .fixed_rate(0.03)
//!     .notional(1_000_000.0)
//!     .direction(SwapDirection::PayFixed)
//!     .build::<f64>()
//!     .unwrap();
//!
//! assert_eq!(swap.fixed_leg().schedule().len(), 5);
//! assert_eq!(swap.direction(), SwapDirection::PayFixed);
//! ```

use num_traits::Float;
use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
use std::fmt;
use std::str::FromStr;

use crate::instruments::InstrumentError;
use crate::schedules::{Frequency, Schedule, ScheduleBuilder, ScheduleError};

/// Floating rate benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateIndex {
    /// Secured Overnight Financing Rate (USD).
    #[default]
    Sofr,
}

impl RateIndex {
    /// Returns the standard name for this index.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            RateIndex::Sofr => "SOFR",
        }
    }

    /// Accrual day count the index is quoted on.
    #[inline]
    pub fn default_day_count(&self) -> DayCountConvention {
        match self {
            RateIndex::Sofr => DayCountConvention::Actual360,
        }
    }
}

impl fmt::Display for RateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RateIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SOFR" => Ok(RateIndex::Sofr),
            _ => Err(format!("Unknown rate index: {}", s)),
        }
    }
}

/// Swap direction, seen from the fixed leg.
///
/// - **PayFixed** (payer swap): pay fixed, receive floating
/// - **ReceiveFixed** (receiver swap): receive fixed, pay floating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SwapDirection {
    /// Pay fixed rate, receive floating rate.
    #[default]
    PayFixed,
    /// Receive fixed rate, pay floating rate.
    ReceiveFixed,
}

impl SwapDirection {
    /// +1 for a payer, −1 for a receiver; multiplies (float − fixed).
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            SwapDirection::PayFixed => T::one(),
            SwapDirection::ReceiveFixed => -T::one(),
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::PayFixed => write!(f, "Payer"),
            SwapDirection::ReceiveFixed => write!(f, "Receiver"),
        }
    }
}

/// Fixed leg: `notional × rate × τ` paid at each period's payment date.
#[derive(Debug, Clone)]
pub struct FixedLeg<T: Float> {
    schedule: Schedule,
    fixed_rate: T,
}

impl<T: Float> FixedLeg<T> {
    /// Create a fixed leg; accruals use the schedule's day count.
    pub fn new(schedule: Schedule, fixed_rate: T) -> Self {
        Self {
            schedule,
            fixed_rate,
        }
    }

    /// Returns the payment schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the fixed rate.
    #[inline]
    pub fn fixed_rate(&self) -> T {
        self.fixed_rate
    }
}

/// Floating leg: `notional × (forward + spread) × τ` per period.
#[derive(Debug, Clone)]
pub struct FloatingLeg<T: Float> {
    schedule: Schedule,
    spread: T,
    index: RateIndex,
}

impl<T: Float> FloatingLeg<T> {
    /// Create a floating leg on `index` with an additive `spread`.
    pub fn new(schedule: Schedule, spread: T, index: RateIndex) -> Self {
        Self {
            schedule,
            spread,
            index,
        }
    }

    /// Returns the payment schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the spread over the index rate.
    #[inline]
    pub fn spread(&self) -> T {
        self.spread
    }

    /// Returns the reference rate index.
    #[inline]
    pub fn index(&self) -> RateIndex {
        self.index
    }
}

/// Plain vanilla interest rate swap.
#[derive(Debug, Clone)]
pub struct InterestRateSwap<T: Float> {
    notional: T,
    fixed_leg: FixedLeg<T>,
    floating_leg: FloatingLeg<T>,
    direction: SwapDirection,
}

impl<T: Float> InterestRateSwap<T> {
    /// Assembles a swap from its legs.
    ///
    /// # Errors
    ///
    /// - `InvalidNotional` unless the notional is positive and finite
    /// - `InvalidRate` if the fixed rate or spread is not finite
    pub fn new(
        notional: T,
        fixed_leg: FixedLeg<T>,
        floating_leg: FloatingLeg<T>,
        direction: SwapDirection,
    ) -> Result<Self, InstrumentError> {
        if !(notional > T::zero()) || !notional.is_finite() {
            return Err(InstrumentError::InvalidNotional {
                notional: notional.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !fixed_leg.fixed_rate().is_finite() {
            return Err(InstrumentError::InvalidRate {
                name: "fixed rate",
                value: fixed_leg.fixed_rate().to_f64().unwrap_or(f64::NAN),
            });
        }
        if !floating_leg.spread().is_finite() {
            return Err(InstrumentError::InvalidRate {
                name: "spread",
                value: floating_leg.spread().to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            notional,
            fixed_leg,
            floating_leg,
            direction,
        })
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> T {
        self.notional
    }

    /// Returns the fixed leg.
    #[inline]
    pub fn fixed_leg(&self) -> &FixedLeg<T> {
        &self.fixed_leg
    }

    /// Returns the floating leg.
    #[inline]
    pub fn floating_leg(&self) -> &FloatingLeg<T> {
        &self.floating_leg
    }

    /// Returns the direction.
    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Fixed rate (the strike when the swap underlies a swaption).
    #[inline]
    pub fn fixed_rate(&self) -> T {
        self.fixed_leg.fixed_rate()
    }

    /// Earliest accrual start over both legs.
    pub fn start_date(&self) -> Date {
        self.fixed_leg
            .schedule()
            .start_date()
            .min(self.floating_leg.schedule().start_date())
    }

    /// Latest accrual end over both legs.
    pub fn maturity_date(&self) -> Date {
        self.fixed_leg
            .schedule()
            .end_date()
            .max(self.floating_leg.schedule().end_date())
    }
}

/// Builder for vanilla swaps.
///
/// Defaults: notional 1,000,000, payer, fixed rate 0, annual 30/360 fixed
/// leg, annual ACT/360 SOFR floating leg with zero spread, US settlement
/// calendar, Modified Following.
#[derive(Debug, Clone)]
pub struct SwapBuilder {
    start: Option<Date>,
    maturity: Option<Date>,
    notional: f64,
    fixed_rate: f64,
    spread: f64,
    direction: SwapDirection,
    index: RateIndex,
    fixed_frequency: Frequency,
    fixed_day_count: DayCountConvention,
    floating_frequency: Frequency,
    floating_day_count: DayCountConvention,
    calendar: Calendar,
    convention: BusinessDayConvention,
}

impl Default for SwapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapBuilder {
    /// Creates a builder with market-standard USD defaults.
    pub fn new() -> Self {
        Self {
            start: None,
            maturity: None,
            notional: 1_000_000.0,
            fixed_rate: 0.0,
            spread: 0.0,
            direction: SwapDirection::PayFixed,
            index: RateIndex::Sofr,
            fixed_frequency: Frequency::Annual,
            fixed_day_count: DayCountConvention::Thirty360,
            floating_frequency: Frequency::Annual,
            floating_day_count: RateIndex::Sofr.default_day_count(),
            calendar: Calendar::UnitedStatesSettlement,
            convention: BusinessDayConvention::ModifiedFollowing,
        }
    }

    /// Accrual start of both legs.
    pub fn start(mut self, date: Date) -> Self {
        self.start = Some(date);
        self
    }

    /// Maturity of both legs.
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Notional amount.
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Fixed rate as a decimal.
    pub fn fixed_rate(mut self, rate: f64) -> Self {
        self.fixed_rate = rate;
        self
    }

    /// Floating spread as a decimal.
    pub fn spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Payer or receiver.
    pub fn direction(mut self, direction: SwapDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Floating index.
    pub fn index(mut self, index: RateIndex) -> Self {
        self.index = index;
        self
    }

    /// Fixed leg frequency and day count.
    pub fn fixed_leg(mut self, frequency: Frequency, day_count: DayCountConvention) -> Self {
        self.fixed_frequency = frequency;
        self.fixed_day_count = day_count;
        self
    }

    /// Floating leg frequency and day count.
    pub fn floating_leg(mut self, frequency: Frequency, day_count: DayCountConvention) -> Self {
        self.floating_frequency = frequency;
        self.floating_day_count = day_count;
        self
    }

    /// Holiday calendar for both schedules.
    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Business day convention for both schedules.
    pub fn convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    fn schedule(
        &self,
        start: Date,
        maturity: Date,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> Result<Schedule, ScheduleError> {
        ScheduleBuilder::new()
            .start(start)
            .end(maturity)
            .frequency(frequency)
            .day_count(day_count)
            .calendar(self.calendar)
            .convention(self.convention)
            .build()
    }

    /// Builds both schedules and the swap.
    ///
    /// # Errors
    ///
    /// - `Schedule` if start or maturity is missing or maturity ≤ start
    /// - validation errors from [`InterestRateSwap::new`]
    pub fn build<T: Float>(self) -> Result<InterestRateSwap<T>, InstrumentError> {
        let start = self
            .start
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let maturity = self
            .maturity
            .ok_or(ScheduleError::MissingField { field: "maturity" })?;

        let fixed_schedule =
            self.schedule(start, maturity, self.fixed_frequency, self.fixed_day_count)?;
        let floating_schedule = self.schedule(
            start,
            maturity,
            self.floating_frequency,
            self.floating_day_count,
        )?;

        let cast = |name: &'static str, value: f64| {
            T::from(value).ok_or(InstrumentError::InvalidRate { name, value })
        };
        let notional = T::from(self.notional).ok_or(InstrumentError::InvalidNotional {
            notional: self.notional,
        })?;

        InterestRateSwap::new(
            notional,
            FixedLeg::new(fixed_schedule, cast("fixed rate", self.fixed_rate)?),
            FloatingLeg::new(floating_schedule, cast("spread", self.spread)?, self.index),
            self.direction,
        )
    }
}
