//! Dated discount curve with node interpolation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};
use num_traits::Float;

/// Interpolation method between curve nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CurveInterpolation {
    /// Linear interpolation on ln D(t) (piecewise constant forward rate).
    #[default]
    LogLinear,

    /// Linear interpolation on continuously compounded zero rates.
    ///
    /// The zero rate of the first node after the reference date is held
    /// flat back to t = 0.
    LinearZero,
}

impl CurveInterpolation {
    /// Returns the method name.
    pub fn name(&self) -> &'static str {
        match self {
            CurveInterpolation::LogLinear => "log-linear discount",
            CurveInterpolation::LinearZero => "linear zero",
        }
    }
}

/// Discount curve defined by `(date, discount factor)` nodes.
///
/// The first node is always the reference date with a discount factor of
/// exactly one. Between nodes the curve interpolates according to
/// [`CurveInterpolation`]; beyond the last node the last zero rate is held
/// flat.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveInterpolation, DiscountCurve, YieldCurve};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let curve = DiscountCurve::new(
///     today,
///     DayCountConvention::Actual360,
///     vec![Date::from_ymd(2025, 1, 2).unwrap(), Date::from_ymd(2026, 1, 2).unwrap()],
///     vec![0.95, 0.90],
///     CurveInterpolation::LogLinear,
/// )
/// .unwrap();
///
/// let mid = curve.discount(Date::from_ymd(2025, 7, 2).unwrap()).unwrap();
/// assert!(mid < 0.95 && mid > 0.90);
/// assert_eq!(curve.node_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve<T: Float> {
    /// Valuation date; node 0
    reference_date: Date,
    /// Day count mapping dates to curve times
    day_count: DayCountConvention,
    /// Node dates, strictly increasing, starting at the reference date
    dates: Vec<Date>,
    /// Node times in years from the reference date
    times: Vec<T>,
    /// Discount factors at each node
    discount_factors: Vec<T>,
    /// Interpolation method
    interpolation: CurveInterpolation,
}

impl<T: Float> DiscountCurve<T> {
    /// Construct a curve from nodes after the reference date.
    ///
    /// A leading node at the reference date is accepted when its discount
    /// factor is one; otherwise the reference node is inserted.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if no node lies after the reference date or the
    ///   two vectors differ in length
    /// - `DateBeforeReference` for a node before the reference date
    /// - `UnsortedNodes` if dates are not strictly increasing
    /// - `InvalidDiscountFactor` for non-positive or non-finite values, or a
    ///   reference node different from one
    pub fn new(
        reference_date: Date,
        day_count: DayCountConvention,
        dates: Vec<Date>,
        discount_factors: Vec<T>,
        interpolation: CurveInterpolation,
    ) -> Result<Self, MarketDataError> {
        if dates.len() != discount_factors.len() {
            return Err(MarketDataError::InsufficientData {
                got: discount_factors.len(),
                need: dates.len(),
            });
        }

        let mut node_dates = Vec::with_capacity(dates.len() + 1);
        let mut node_dfs = Vec::with_capacity(dates.len() + 1);
        node_dates.push(reference_date);
        node_dfs.push(T::one());

        for (index, (date, df)) in dates.into_iter().zip(discount_factors).enumerate() {
            if !df.is_finite() || df <= T::zero() {
                return Err(MarketDataError::InvalidDiscountFactor {
                    index,
                    df: df.to_f64().unwrap_or(f64::NAN),
                });
            }
            if date < reference_date {
                return Err(MarketDataError::DateBeforeReference {
                    date,
                    reference: reference_date,
                });
            }
            if date == reference_date {
                let tol = T::from(1e-12).unwrap_or_else(T::epsilon);
                if index != 0 || (df - T::one()).abs() > tol {
                    return Err(MarketDataError::InvalidDiscountFactor {
                        index,
                        df: df.to_f64().unwrap_or(f64::NAN),
                    });
                }
                continue;
            }
            if node_dates.last().is_some_and(|last| date <= *last) {
                return Err(MarketDataError::UnsortedNodes { index });
            }
            node_dates.push(date);
            node_dfs.push(df);
        }

        if node_dates.len() < 2 {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }

        let times = node_dates
            .iter()
            .map(|d| {
                T::from(day_count.year_fraction_dates(reference_date, *d)).unwrap_or_else(T::zero)
            })
            .collect();

        Ok(Self {
            reference_date,
            day_count,
            dates: node_dates,
            times,
            discount_factors: node_dfs,
            interpolation,
        })
    }

    /// Node dates, starting with the reference date.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Node times in years from the reference date.
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Discount factors at the nodes.
    pub fn discount_factors(&self) -> &[T] {
        &self.discount_factors
    }

    /// Interpolation method.
    pub fn interpolation(&self) -> CurveInterpolation {
        self.interpolation
    }

    /// Number of nodes, including the reference node.
    pub fn node_count(&self) -> usize {
        self.dates.len()
    }

    /// Last node date.
    pub fn max_date(&self) -> Date {
        self.dates.last().copied().unwrap_or(self.reference_date)
    }

    fn node_zero_rate(&self, i: usize) -> T {
        // Node 0 sits at t = 0; borrow the first real node's rate
        let i = i.max(1);
        -self.discount_factors[i].ln() / self.times[i]
    }

    fn interpolate(&self, t: T) -> T {
        let n = self.times.len();
        let last = n - 1;

        if t == self.times[last] {
            return self.discount_factors[last];
        }
        if t > self.times[last] {
            // Flat zero-rate extrapolation
            return (-self.node_zero_rate(last) * t).exp();
        }

        // times[0] = 0 < t < times[last]
        let hi = self.times.partition_point(|x| *x <= t).clamp(1, last);
        let lo = hi - 1;
        let (t1, t2) = (self.times[lo], self.times[hi]);
        let w = (t - t1) / (t2 - t1);

        match self.interpolation {
            CurveInterpolation::LogLinear => {
                let ln1 = self.discount_factors[lo].ln();
                let ln2 = self.discount_factors[hi].ln();
                (ln1 * (T::one() - w) + ln2 * w).exp()
            }
            CurveInterpolation::LinearZero => {
                let z1 = self.node_zero_rate(lo);
                let z2 = self.node_zero_rate(hi);
                let z = z1 * (T::one() - w) + z2 * w;
                (-z * t).exp()
            }
        }
    }
}

impl<T: Float> YieldCurve<T> for DiscountCurve<T> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if !t.is_finite() || t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok(self.interpolate(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample_curve(interpolation: CurveInterpolation) -> DiscountCurve<f64> {
        DiscountCurve::new(
            date(2024, 1, 2),
            DayCountConvention::Actual365Fixed,
            vec![date(2025, 1, 2), date(2026, 1, 2), date(2029, 1, 2)],
            vec![0.95, 0.90, 0.78],
            interpolation,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_node_is_one() {
        let curve = sample_curve(CurveInterpolation::LogLinear);
        assert_eq!(curve.discount(date(2024, 1, 2)).unwrap(), 1.0);
        assert_eq!(curve.discount_factors()[0], 1.0);
        assert_eq!(curve.dates()[0], date(2024, 1, 2));
    }

    #[test]
    fn test_nodes_are_reproduced_exactly() {
        for interp in [CurveInterpolation::LogLinear, CurveInterpolation::LinearZero] {
            let curve = sample_curve(interp);
            assert_relative_eq!(curve.discount(date(2025, 1, 2)).unwrap(), 0.95, epsilon = 1e-14);
            assert_relative_eq!(curve.discount(date(2026, 1, 2)).unwrap(), 0.90, epsilon = 1e-14);
            assert_relative_eq!(curve.discount(date(2029, 1, 2)).unwrap(), 0.78, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_log_linear_midpoint_is_geometric_mean() {
        let curve = sample_curve(CurveInterpolation::LogLinear);
        let t1 = curve.times()[1];
        let t2 = curve.times()[2];
        let mid = curve.discount_factor(0.5 * (t1 + t2)).unwrap();
        assert_relative_eq!(mid, (0.95_f64 * 0.90).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_linear_zero_interpolates_rates() {
        let curve = sample_curve(CurveInterpolation::LinearZero);
        let t1 = curve.times()[1];
        let t2 = curve.times()[2];
        let z1 = -(0.95_f64).ln() / t1;
        let z2 = -(0.90_f64).ln() / t2;
        let t = 0.5 * (t1 + t2);
        let expected = (-(0.5 * (z1 + z2)) * t).exp();
        assert_relative_eq!(curve.discount_factor(t).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_zero_extrapolation() {
        let curve = sample_curve(CurveInterpolation::LogLinear);
        let t_last = *curve.times().last().unwrap();
        let z = -(0.78_f64).ln() / t_last;
        let t = t_last + 5.0;
        assert_relative_eq!(curve.discount_factor(t).unwrap(), (-z * t).exp(), epsilon = 1e-12);
        assert_relative_eq!(curve.zero_rate(t).unwrap(), z, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_time_rejected() {
        let curve = sample_curve(CurveInterpolation::LogLinear);
        assert!(curve.discount_factor(-0.1).is_err());
        assert!(curve.discount_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_leading_reference_node_accepted() {
        let today = date(2024, 1, 2);
        let curve = DiscountCurve::new(
            today,
            DayCountConvention::Actual360,
            vec![today, date(2025, 1, 2)],
            vec![1.0, 0.95],
            CurveInterpolation::LogLinear,
        )
        .unwrap();
        assert_eq!(curve.node_count(), 2);
    }

    #[test]
    fn test_invalid_nodes_rejected() {
        let today = date(2024, 1, 2);
        let dc = DayCountConvention::Actual360;
        let ll = CurveInterpolation::LogLinear;

        let err = DiscountCurve::new(today, dc, vec![date(2025, 1, 2)], vec![0.0], ll).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidDiscountFactor { index: 0, .. }));

        let err = DiscountCurve::new(
            today,
            dc,
            vec![date(2026, 1, 2), date(2025, 1, 2)],
            vec![0.9, 0.95],
            ll,
        )
        .unwrap_err();
        assert_eq!(err, MarketDataError::UnsortedNodes { index: 1 });

        let err = DiscountCurve::new(today, dc, vec![date(2023, 1, 2)], vec![1.01], ll).unwrap_err();
        assert!(matches!(err, MarketDataError::DateBeforeReference { .. }));

        let err = DiscountCurve::<f64>::new(today, dc, vec![], vec![], ll).unwrap_err();
        assert!(matches!(err, MarketDataError::InsufficientData { .. }));

        let err = DiscountCurve::new(today, dc, vec![today], vec![0.99], ll).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidDiscountFactor { .. }));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_decreasing_nodes_give_decreasing_curve(
                rates in proptest::collection::vec(0.001f64..0.15, 2..8),
                t in 0.0f64..12.0,
                dt in 0.01f64..1.0,
            ) {
                let today = date(2024, 1, 2);
                let dates: Vec<Date> = (1..=rates.len())
                    .map(|y| today.add_years(y as u32).unwrap())
                    .collect();
                // Cumulative products keep discount factors decreasing
                let mut df = 1.0;
                let dfs: Vec<f64> = rates.iter().map(|r| { df /= 1.0 + r; df }).collect();
                let curve = DiscountCurve::new(
                    today,
                    DayCountConvention::Actual365Fixed,
                    dates,
                    dfs,
                    CurveInterpolation::LogLinear,
                ).unwrap();
                let d1 = curve.discount_factor(t).unwrap();
                let d2 = curve.discount_factor(t + dt).unwrap();
                prop_assert!(d2 < d1);
                prop_assert!(d1 <= 1.0);
            }
        }
    }
}
