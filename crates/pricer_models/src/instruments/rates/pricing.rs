//! Cash-flow discounting and swaption valuation.
//!
//! Single-curve setting: one discount curve both discounts cash flows and
//! projects floating coupons. The curve's reference date is the valuation
//! date; periods paying before it are treated as settled.
//!
//! - Fixed leg PV = Σ N·K·τᵢ·P(payᵢ)
//! - Floating leg PV = Σ N·(Fᵢ + s)·τᵢ·P(payᵢ), Fᵢ = (P(startᵢ)/P(endᵢ) − 1)/τᵢ
//! - Payer NPV = PV(float) − PV(fixed), receiver is the negative
//! - European swaption: Black on the forward par rate with annuity numeraire
//! - Bermudan swaption: backward induction on a Hull-White trinomial tree

use num_traits::Float;
use pricer_core::market_data::{MarketDataError, YieldCurve};
use pricer_core::types::{Date, PricingError};
use thiserror::Error;

use super::swap::{FixedLeg, FloatingLeg, InterestRateSwap};
use super::swaption::{BermudanSwaption, EuropeanSwaption};
use crate::analytical::{black76::MIN_TOTAL_VOLATILITY, AnalyticalError, Black76};
use crate::instruments::InstrumentError;
use crate::models::rates::{HullWhiteTree, LatticeError, TimeGrid};
use crate::schedules::Period;

/// Failure while valuing an instrument.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValuationError {
    /// Curve lookup failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Closed-form model rejected its inputs.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Lattice construction or calibration failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// Instrument terms are invalid.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}

impl From<ValuationError> for PricingError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::MarketData(e) => e.into(),
            ValuationError::Analytical(e) => e.into(),
            ValuationError::Lattice(e) => e.into(),
            ValuationError::Instrument(e) => e.into(),
        }
    }
}

/// Swap valuation breakdown, all amounts in currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapValuation<T> {
    /// Value to the holder (sign follows the swap direction).
    pub npv: T,
    /// Present value of the fixed leg.
    pub fixed_leg_pv: T,
    /// Present value of the floating leg.
    pub floating_leg_pv: T,
    /// Present value of one unit of fixed rate: N·Σ τᵢ·P(payᵢ).
    pub annuity: T,
    /// Fixed rate that sets the NPV to zero; zero once every fixed
    /// payment has settled.
    pub par_rate: T,
}

#[inline]
fn to_t<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

fn is_live(period: &Period, valuation: Date) -> bool {
    period.payment() >= valuation
}

/// Annuity of a fixed leg: N·Σ τᵢ·P(payᵢ) over unsettled periods.
pub fn fixed_leg_annuity<T, C>(leg: &FixedLeg<T>, notional: T, curve: &C) -> Result<T, ValuationError>
where
    T: Float,
    C: YieldCurve<T> + ?Sized,
{
    let valuation = curve.reference_date();
    let mut sum = T::zero();
    for period in leg.schedule().iter().filter(|p| is_live(p, valuation)) {
        let tau = to_t::<T>(period.year_fraction());
        sum = sum + tau * curve.discount(period.payment())?;
    }
    Ok(notional * sum)
}

/// Present value of the fixed leg.
pub fn fixed_leg_pv<T, C>(leg: &FixedLeg<T>, notional: T, curve: &C) -> Result<T, ValuationError>
where
    T: Float,
    C: YieldCurve<T> + ?Sized,
{
    Ok(leg.fixed_rate() * fixed_leg_annuity(leg, notional, curve)?)
}

/// Present value of the floating leg.
///
/// A period that started before the valuation date projects its coupon
/// from the valuation date.
pub fn floating_leg_pv<T, C>(leg: &FloatingLeg<T>, notional: T, curve: &C) -> Result<T, ValuationError>
where
    T: Float,
    C: YieldCurve<T> + ?Sized,
{
    let valuation = curve.reference_date();
    let mut pv = T::zero();
    for period in leg.schedule().iter().filter(|p| is_live(p, valuation)) {
        let tau = to_t::<T>(period.year_fraction());
        let forward = curve.simple_forward_rate(period.start().max(valuation), period.end(), tau)?;
        let df = curve.discount(period.payment())?;
        pv = pv + (forward + leg.spread()) * tau * df;
    }
    Ok(notional * pv)
}

/// Values a swap against `curve`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveInterpolation, DiscountCurve};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::instruments::rates::{pricing::value_swap, SwapBuilder};
///
/// let today = Date::from_ymd(2025, 1, 2).unwrap();
/// let curve = DiscountCurve::new(
///     today,
///     DayCountConvention::Actual360,
///     vec![Date::from_ymd(2035, 1, 2).unwrap()],
///     vec![0.6_f64],
///     CurveInterpolation::LogLinear,
/// )
/// .unwrap();
///
/// let swap = SwapBuilder::new()
///     .start(today)
///     .maturity(Date::from_ymd(2030, 1, 2).unwrap())
///     .fixed_rate(0.03)
///     .build::<f64>()
///     .unwrap();
///
/// let v = value_swap(&swap, &curve).unwrap();
/// let at_par = (v.floating_leg_pv - v.par_rate * v.annuity).abs();
/// assert!(at_par < 1e-6);
/// ```
pub fn value_swap<T, C>(swap: &InterestRateSwap<T>, curve: &C) -> Result<SwapValuation<T>, ValuationError>
where
    T: Float,
    C: YieldCurve<T> + ?Sized,
{
    let notional = swap.notional();
    let annuity = fixed_leg_annuity(swap.fixed_leg(), notional, curve)?;
    let fixed_leg_pv = swap.fixed_rate() * annuity;
    let floating_leg_pv = floating_leg_pv(swap.floating_leg(), notional, curve)?;
    let npv = swap.direction().sign::<T>() * (floating_leg_pv - fixed_leg_pv);
    let par_rate = if annuity > T::zero() {
        floating_leg_pv / annuity
    } else {
        T::zero()
    };

    Ok(SwapValuation {
        npv,
        fixed_leg_pv,
        floating_leg_pv,
        annuity,
        par_rate,
    })
}

/// Black value of a European swaption.
///
/// Payer: A·[F·N(d₁) − K·N(d₂)]; receiver: A·[K·N(−d₂) − F·N(−d₁)], with A
/// the annuity, F the forward par rate, K the strike and T the curve time
/// to exercise. The intrinsic value A·max(±(F − K), 0) is returned when σ√T
/// is negligible, and when F or K is non-positive, where it is the limit of
/// the lognormal price.
///
/// # Errors
///
/// - `Analytical(InvalidExpiry)` if exercise precedes the valuation date
/// - `Analytical(NumericalInstability)` for a non-finite price
pub fn price_european_swaption<T, C>(swaption: &EuropeanSwaption<T>, curve: &C) -> Result<T, ValuationError>
where
    T: Float,
    C: YieldCurve<T> + ?Sized,
{
    let expiry = curve.time_to(swaption.exercise_date());
    if expiry < T::zero() {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: expiry.to_f64().unwrap_or(f64::NAN),
        }
        .into());
    }

    let swap = value_swap(swaption.underlying(), curve)?;
    let forward = swap.par_rate;
    let strike = swaption.strike();
    let sigma = swaption.volatility();

    let degenerate = sigma * expiry.sqrt() < to_t(MIN_TOTAL_VOLATILITY)
        || !(forward > T::zero())
        || !(strike > T::zero());
    if degenerate {
        let intrinsic = if swaption.is_payer() {
            forward - strike
        } else {
            strike - forward
        };
        return Ok(swap.annuity * intrinsic.max(T::zero()));
    }

    let black = Black76::new(forward, sigma)?;
    let undiscounted = if swaption.is_payer() {
        black.price_call(strike, expiry)
    } else {
        black.price_put(strike, expiry)
    };

    let price = swap.annuity * undiscounted;
    if !price.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: "non-finite Black swaption price".to_string(),
        }
        .into());
    }
    Ok(price)
}

/// Value of one underlying period, added on the lattice at its accrual
/// start. `pay` and `end` index [`SliceFlows::maturities`].
#[derive(Debug, Clone, Copy)]
enum PeriodFlow {
    /// `−N·K·τ` paid at `pay`.
    Fixed { pay: usize, amount: f64 },
    /// `N·(1/P(s,e) − 1 + spread·τ)` paid at `pay`.
    Floating {
        end: usize,
        pay: usize,
        notional: f64,
        spread_amount: f64,
    },
}

/// Periods whose accrual starts on one slice.
#[derive(Debug, Clone, Default)]
struct SliceFlows {
    /// Distinct bond maturities (slices) the periods discount to
    maturities: Vec<usize>,
    flows: Vec<PeriodFlow>,
}

impl SliceFlows {
    /// Position of `slice` in `maturities`, registering it on first use.
    fn maturity(&mut self, slice: usize) -> usize {
        match self.maturities.iter().position(|&m| m == slice) {
            Some(k) => k,
            None => {
                self.maturities.push(slice);
                self.maturities.len() - 1
            }
        }
    }
}

/// Tree plus the slice bookkeeping needed to roll back the underlying.
struct BermudanLattice {
    tree: HullWhiteTree,
    exercise_slices: Vec<usize>,
    /// Indexed by slice of accrual start
    flows: Vec<SliceFlows>,
    sign: f64,
}

fn slice_of(grid: &TimeGrid, t: f64) -> Result<usize, LatticeError> {
    grid.index_of(t).ok_or(LatticeError::InvalidHorizon(t))
}

impl BermudanLattice {
    fn build<C>(swaption: &BermudanSwaption, curve: &C) -> Result<Self, ValuationError>
    where
        C: YieldCurve<f64> + ?Sized,
    {
        let valuation = curve.reference_date();
        let exercise_dates = swaption.exercise_dates();
        if let Some(&date) = exercise_dates.iter().find(|d| **d < valuation) {
            return Err(LatticeError::ExerciseBeforeValuation { date, valuation }.into());
        }
        let first_exercise = exercise_dates[0];

        let swap = swaption.underlying();
        let fixed_periods = swap.fixed_leg().schedule().periods_from(first_exercise);
        let floating_periods = swap.floating_leg().schedule().periods_from(first_exercise);

        let time = |d: Date| curve.time_to(d);
        let mut mandatory: Vec<f64> = exercise_dates.iter().map(|d| time(*d)).collect();
        for p in fixed_periods.iter().chain(floating_periods) {
            mandatory.extend([time(p.start()), time(p.end()), time(p.payment())]);
        }

        let grid = TimeGrid::new(&mandatory, swaption.lattice())?;

        let notional = swap.notional();
        let strike = swap.fixed_rate();
        let spread = swap.floating_leg().spread();
        let mut flows = vec![SliceFlows::default(); grid.steps() + 1];
        for p in fixed_periods {
            let slot = &mut flows[slice_of(&grid, time(p.start()))?];
            let pay = slot.maturity(slice_of(&grid, time(p.payment()))?);
            slot.flows.push(PeriodFlow::Fixed {
                pay,
                amount: -notional * strike * p.year_fraction(),
            });
        }
        for p in floating_periods {
            let slot = &mut flows[slice_of(&grid, time(p.start()))?];
            let end = slot.maturity(slice_of(&grid, time(p.end()))?);
            let pay = slot.maturity(slice_of(&grid, time(p.payment()))?);
            slot.flows.push(PeriodFlow::Floating {
                end,
                pay,
                notional,
                spread_amount: notional * spread * p.year_fraction(),
            });
        }

        let exercise_slices = exercise_dates
            .iter()
            .map(|d| slice_of(&grid, time(*d)))
            .collect::<Result<Vec<_>, _>>()?;

        let tree = HullWhiteTree::build(*swaption.model(), grid, curve)?;

        Ok(Self {
            tree,
            exercise_slices,
            flows,
            sign: swap.direction().sign::<f64>(),
        })
    }

    /// Value at every node of slice `i` of the periods starting on slice `i`.
    ///
    /// Each maturity is rolled back once, however many periods share it.
    fn flows_at(&self, i: usize) -> Option<Vec<f64>> {
        let slot = self.flows.get(i).filter(|s| !s.flows.is_empty())?;
        let bonds: Vec<Vec<f64>> = slot
            .maturities
            .iter()
            .map(|&m| self.tree.zero_bond(i, m))
            .collect();

        let mut total = vec![0.0; self.tree.slice_len(i)];
        for flow in &slot.flows {
            match *flow {
                PeriodFlow::Fixed { pay, amount } => {
                    for (t, pp) in total.iter_mut().zip(&bonds[pay]) {
                        *t += amount * pp;
                    }
                }
                PeriodFlow::Floating {
                    end,
                    pay,
                    notional,
                    spread_amount,
                } => {
                    for ((t, pe), pp) in total.iter_mut().zip(&bonds[end]).zip(&bonds[pay]) {
                        *t += notional * (pp / pe - pp) + spread_amount * pp;
                    }
                }
            }
        }
        for t in &mut total {
            *t *= self.sign;
        }
        Some(total)
    }

    /// Rolls the underlying and the option back to t = 0.
    ///
    /// Returns the option value at the root and the underlying values on
    /// the first exercise slice.
    fn rollback(&self) -> (f64, Vec<f64>) {
        let n = self.tree.grid().steps();
        let mut underlying = vec![0.0; self.tree.slice_len(n)];
        let mut option = vec![0.0; self.tree.slice_len(n)];
        let mut first_exercise_values = Vec::new();

        for i in (0..=n).rev() {
            if i < n {
                underlying = self.tree.rollback(i, &underlying);
                option = self.tree.rollback(i, &option);
            }
            if let Some(add) = self.flows_at(i) {
                for (u, a) in underlying.iter_mut().zip(add) {
                    *u += a;
                }
            }
            if self.exercise_slices.contains(&i) {
                for (o, u) in option.iter_mut().zip(&underlying) {
                    *o = o.max(*u);
                }
                if Some(&i) == self.exercise_slices.first() {
                    first_exercise_values = underlying.clone();
                }
            }
        }

        (option[0], first_exercise_values)
    }
}

/// Lattice value of a Bermudan swaption.
///
/// The tree is fitted to `curve`, so zero-coupon bonds rolled back on it
/// reprice the curve and the exercise value at each date equals the value
/// of the remaining underlying swap on that tree.
///
/// # Errors
///
/// - `Lattice(ExerciseBeforeValuation)` for an exercise date in the past
/// - lattice construction errors (`TooManySteps`, `NonPositiveVariance`,
///   `DegenerateStatePrices`, …)
pub fn price_bermudan_swaption<C>(swaption: &BermudanSwaption, curve: &C) -> Result<f64, ValuationError>
where
    C: YieldCurve<f64> + ?Sized,
{
    let lattice = BermudanLattice::build(swaption, curve)?;
    let (npv, _) = lattice.rollback();
    if !npv.is_finite() {
        return Err(LatticeError::DegenerateStatePrices {
            step: 0,
            sum: npv,
        }
        .into());
    }
    Ok(npv)
}
