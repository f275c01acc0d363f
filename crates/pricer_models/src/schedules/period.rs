//! Accrual period of a schedule.

use pricer_core::types::{Date, DayCountConvention};
use std::fmt;

/// A single accrual period in a schedule.
///
/// Holds the accrual boundaries, the payment date and the day count used
/// for the accrual fraction. Payments are made on the (rolled) accrual end.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Period;
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let period = Period::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
///     DayCountConvention::Thirty360,
/// );
///
/// assert_eq!(period.payment(), period.end());
/// assert!((period.year_fraction() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    start: Date,
    end: Date,
    payment: Date,
    day_count: DayCountConvention,
}

impl Period {
    /// Creates a period paying on its accrual end date.
    #[inline]
    pub fn new(start: Date, end: Date, day_count: DayCountConvention) -> Self {
        Self::with_payment(start, end, end, day_count)
    }

    /// Creates a period with an explicit payment date.
    #[inline]
    pub fn with_payment(
        start: Date,
        end: Date,
        payment: Date,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            start,
            end,
            payment,
            day_count,
        }
    }

    /// Accrual start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Accrual end date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.payment
    }

    /// Day count convention of the accrual fraction.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Accrual fraction τ of the period under its day count.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.day_count.year_fraction_dates(self.start, self.end)
    }

    /// Number of calendar days in the period.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start
    }

    /// True when `start <= date < end`.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Period({} to {}, pay {}, {})",
            self.start, self.end, self.payment, self.day_count
        )
    }
}
