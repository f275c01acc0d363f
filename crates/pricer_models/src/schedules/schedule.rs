//! Schedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;
use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};

/// An ordered, contiguous set of accrual periods.
///
/// Built through [`ScheduleBuilder`]; a schedule always holds at least one
/// period, its first period starts on the requested start date and its last
/// period ends exactly on the requested maturity.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .end(Date::from_ymd(2026, 1, 15).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .day_count(DayCountConvention::Actual360)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    periods: Vec<Period>,
}

impl Schedule {
    /// Returns the periods in the schedule.
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns the number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// True when there are no periods.
    ///
    /// Schedules from [`ScheduleBuilder::build`] span `start < end` and hold
    /// at least one period.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Accrual start of the first period.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// Accrual end of the last period (the maturity).
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }

    /// Payment dates in period order.
    pub fn payment_dates(&self) -> Vec<Date> {
        self.periods.iter().map(Period::payment).collect()
    }

    /// Accrual start dates in period order.
    pub fn accrual_start_dates(&self) -> Vec<Date> {
        self.periods.iter().map(Period::start).collect()
    }

    /// All period boundaries: every accrual start followed by the maturity.
    pub fn boundaries(&self) -> Vec<Date> {
        let mut dates = self.accrual_start_dates();
        dates.push(self.end_date());
        dates
    }

    /// Returns an iterator over the periods.
    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    /// Sum of accrual fractions.
    pub fn total_year_fraction(&self) -> f64 {
        self.periods.iter().map(Period::year_fraction).sum()
    }

    /// Periods whose accrual starts on or after `date`.
    pub fn periods_from(&self, date: Date) -> &[Period] {
        let idx = self.periods.partition_point(|p| p.start() < date);
        &self.periods[idx..]
    }

    /// Returns the period containing the given date, if any.
    pub fn period_containing(&self, date: Date) -> Option<&Period> {
        self.periods.iter().find(|p| p.contains(date))
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

/// Builder for constructing schedules.
///
/// Defaults: annual frequency, ACT/365F, US settlement calendar, Modified
/// Following. Start and end dates are required.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2025, 1, 2).unwrap())
///     .end(Date::from_ymd(2030, 1, 2).unwrap())
///     .frequency(Frequency::Annual)
///     .day_count(DayCountConvention::Thirty360)
///     .calendar(Calendar::UnitedStatesSettlement)
///     .convention(BusinessDayConvention::ModifiedFollowing)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 5);
/// assert_eq!(schedule.end_date(), Date::from_ymd(2030, 1, 2).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Frequency,
    day_count: DayCountConvention,
    calendar: Calendar,
    convention: BusinessDayConvention,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a new schedule builder with default settings.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: Frequency::Annual,
            day_count: DayCountConvention::Actual365Fixed,
            calendar: Calendar::UnitedStatesSettlement,
            convention: BusinessDayConvention::ModifiedFollowing,
        }
    }

    /// Sets the start date of the schedule.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the maturity of the schedule.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the payment frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = freq;
        self
    }

    /// Sets the day count convention.
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = dc;
        self
    }

    /// Sets the holiday calendar used to roll boundaries.
    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention used to roll boundaries.
    pub fn convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// - `MissingField` if start or end is missing
    /// - `InvalidDateRange` if end is not after start
    /// - `DateOverflow` if boundary arithmetic leaves the date range
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let boundaries = self.generate_boundaries(start, end)?;
        let periods = boundaries
            .windows(2)
            .map(|w| Period::new(w[0], w[1], self.day_count))
            .collect();

        Ok(Schedule { periods })
    }

    /// Boundaries `start, roll(start + k·tenor)..., end`.
    ///
    /// Each step is measured from the unadjusted start so month-end rolling
    /// does not drift. Generation stops at the first boundary that lands on
    /// or after the maturity once rolled.
    fn generate_boundaries(&self, start: Date, end: Date) -> Result<Vec<Date>, ScheduleError> {
        let step = self.frequency.months_between_payments();
        let mut boundaries = vec![start];

        for k in 1.. {
            let unadjusted = start.add_months(step * k)?;
            if unadjusted >= end {
                break;
            }
            let rolled = self.convention.adjust(unadjusted, self.calendar)?;
            if rolled >= end {
                break;
            }
            if boundaries.last().is_some_and(|last| rolled > *last) {
                boundaries.push(rolled);
            }
        }

        boundaries.push(end);
        Ok(boundaries)
    }
}
