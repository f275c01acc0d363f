//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};
use num_traits::Float;

/// Generic yield curve trait for discount factor and rate calculations.
///
/// A curve is anchored at a reference (valuation) date and converts dates
/// into times with its own day count, so every consumer (leg discounting,
/// Black expiry, lattice grid) sees one consistent time axis.
///
/// # Contract
///
/// - `discount_factor(t)` returns the discount factor D(t) for curve time t
/// - `discount(date)` returns D at a calendar date
/// - `zero_rate(t)` returns the continuously compounded zero rate r(t)
/// - `forward_rate(t1, t2)` returns the continuously compounded forward rate
/// - `simple_forward_rate(d1, d2, tau)` returns the simply compounded forward
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
pub trait YieldCurve<T: Float> {
    /// Reference (valuation) date of the curve.
    fn reference_date(&self) -> Date;

    /// Day count used to convert dates into curve times.
    fn day_count(&self) -> DayCountConvention;

    /// Return the discount factor for curve time `t`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t < 0` or not finite.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Curve time of `date` (negative before the reference date).
    fn time_to(&self, date: Date) -> T {
        let yf = self
            .day_count()
            .year_fraction_dates(self.reference_date(), date);
        T::from(yf).unwrap_or_else(T::zero)
    }

    /// Return the discount factor at a calendar date.
    ///
    /// # Errors
    ///
    /// `MarketDataError::DateBeforeReference` for dates before the
    /// reference date.
    fn discount(&self, date: Date) -> Result<T, MarketDataError> {
        let reference = self.reference_date();
        if date < reference {
            return Err(MarketDataError::DateBeforeReference { date, reference });
        }
        self.discount_factor(self.time_to(date))
    }

    /// Return the continuously compounded zero rate for maturity `t`.
    ///
    /// ```text
    /// r(t) = -ln(D(t)) / t
    /// ```
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Return the continuously compounded forward rate between t1 and t2.
    ///
    /// ```text
    /// f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)
    /// ```
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }

    /// Simply compounded forward rate over `[start, end]` with accrual
    /// fraction `tau`:
    ///
    /// ```text
    /// F = (D(start) / D(end) - 1) / tau
    /// ```
    fn simple_forward_rate(&self, start: Date, end: Date, tau: T) -> Result<T, MarketDataError> {
        if tau <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: tau.to_f64().unwrap_or(0.0),
            });
        }
        let df_start = self.discount(start)?;
        let df_end = self.discount(end)?;
        Ok((df_start / df_end - T::one()) / tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Continuously compounded flat curve for trait default tests.
    struct MockCurve {
        reference: Date,
        rate: f64,
    }

    impl YieldCurve<f64> for MockCurve {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Actual365Fixed
        }

        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    fn mock() -> MockCurve {
        MockCurve {
            reference: Date::from_ymd(2024, 1, 1).unwrap(),
            rate: 0.05,
        }
    }

    #[test]
    fn test_time_to_uses_day_count() {
        let curve = mock();
        let t = curve.time_to(Date::from_ymd(2025, 1, 1).unwrap());
        assert_relative_eq!(t, 366.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_at_reference_is_one() {
        let curve = mock();
        assert_eq!(curve.discount(curve.reference_date()).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_before_reference_fails() {
        let curve = mock();
        let result = curve.discount(Date::from_ymd(2023, 12, 31).unwrap());
        assert!(matches!(
            result,
            Err(MarketDataError::DateBeforeReference { .. })
        ));
    }

    #[test]
    fn test_zero_rate_and_forward_rate_defaults() {
        let curve = mock();
        assert_relative_eq!(curve.zero_rate(2.0).unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(curve.forward_rate(1.0, 3.0).unwrap(), 0.05, epsilon = 1e-12);
        assert!(curve.zero_rate(0.0).is_err());
        assert!(curve.forward_rate(2.0, 1.0).is_err());
    }

    #[test]
    fn test_simple_forward_rate() {
        let curve = mock();
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        let tau = 1.0;
        let fwd = curve.simple_forward_rate(start, end, tau).unwrap();
        // exp(r * 365/365) - 1
        assert_relative_eq!(fwd, (0.05_f64).exp() - 1.0, epsilon = 1e-12);
        assert!(curve.simple_forward_rate(start, end, 0.0).is_err());
    }
}
