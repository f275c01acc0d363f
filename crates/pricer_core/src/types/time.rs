//! Time types and Day Count Conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Industry-standard day count conventions
//! - `BusinessDayConvention`: Rolling rules for non-business days
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // 182 actual days over 360
//! let yf = DayCountConvention::Actual360.year_fraction_dates(start, end);
//! assert!((yf - 0.5056).abs() < 0.001);
//! ```

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::calendar::Calendar;
use super::error::{ConventionError, DateError};

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the month/day arithmetic needed for
/// schedule generation.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the components do not form a
    /// calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns the current local date.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the inner NaiveDate.
    #[inline]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Adds calendar months, clamping to the end of shorter months
    /// (31 January + 1M = 28/29 February).
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} months", self, months)))
    }

    /// Adds whole calendar years.
    pub fn add_years(self, years: u32) -> Result<Self, DateError> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} years", self, years)))?;
        self.add_months(months)
    }

    /// Adds (or subtracts, when negative) calendar days.
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::Overflow(format!("{} + {} days", self, days)))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of calendar days from `rhs` to `self`.
    fn sub(self, rhs: Self) -> Self::Output {
        (self.0 - rhs.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention for year fraction calculations.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::DayCountConvention;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
///
/// let yf = DayCountConvention::Actual365Fixed.year_fraction(start, end);
/// assert!((yf - 0.4986).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    Actual365Fixed,

    /// Actual/360: actual_days / 360.0
    ///
    /// Money market convention (deposits, SOFR floating legs).
    Actual360,

    /// 30/360 US Bond Basis
    ///
    /// Each month is treated as having 30 days, and the year as 360 days.
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Actual365Fixed.name(), "ACT/365F");
    /// assert_eq!(DayCountConvention::Actual360.name(), "ACT/360");
    /// assert_eq!(DayCountConvention::Thirty360.name(), "30/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual365Fixed => "ACT/365F",
            DayCountConvention::Actual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Calculate year fraction between two dates.
    ///
    /// # Panics
    /// Panics if `start > end`
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        assert!(
            start <= end,
            "start date must be less than or equal to end date"
        );
        self.signed_fraction(start, end)
    }

    /// Calculates year fraction using Date type.
    ///
    /// Unlike `year_fraction`, this returns negative values when
    /// `start > end` instead of panicking. Curve times before the
    /// reference date are negative.
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    ///
    /// let yf = DayCountConvention::Actual365Fixed.year_fraction_dates(start, end);
    /// let yf_neg = DayCountConvention::Actual365Fixed.year_fraction_dates(end, start);
    /// assert!((yf + yf_neg).abs() < 1e-15);
    /// ```
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        if start <= end {
            self.signed_fraction(start.into_inner(), end.into_inner())
        } else {
            -self.signed_fraction(end.into_inner(), start.into_inner())
        }
    }

    fn signed_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        match self {
            DayCountConvention::Actual365Fixed => (end - start).num_days() as f64 / 365.0,
            DayCountConvention::Actual360 => (end - start).num_days() as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let d1 = start.day().min(30) as i32;
                let d2 = if end.day() == 31 && d1 == 30 {
                    30
                } else {
                    end.day() as i32
                };

                let days = 360 * (end.year() - start.year())
                    + 30 * (end.month() as i32 - start.month() as i32)
                    + (d2 - d1);
                days as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = ConventionError;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// - ACT/365F: "ACT/365F", "ACT/365", "Actual365Fixed", "A365"
    /// - ACT/360: "ACT/360", "Actual360", "A360"
    /// - 30/360: "30/360", "Thirty360", "30/360 Bond Basis"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' ', '_'], "").as_str() {
            "ACT365F" | "ACT365" | "ACTUAL365FIXED" | "ACTUAL365" | "A365" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Actual360),
            "30360" | "THIRTY360" | "30360BONDBASIS" => Ok(DayCountConvention::Thirty360),
            _ => Err(ConventionError::UnknownDayCount(s.to_string())),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Business Day Convention for date adjustments.
///
/// Rolling is a pure function of the date, the convention and a
/// [`Calendar`]:
///
/// ```
/// use pricer_core::types::{BusinessDayConvention, Calendar, Date};
///
/// // Saturday 31 August 2024: following would cross into September
/// let saturday = Date::from_ymd(2024, 8, 31).unwrap();
/// let rolled = BusinessDayConvention::ModifiedFollowing
///     .adjust(saturday, Calendar::WeekendsOnly)
///     .unwrap();
/// assert_eq!(rolled, Date::from_ymd(2024, 8, 30).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BusinessDayConvention {
    /// Move to the next business day.
    Following,

    /// Move to the next business day unless that crosses a month boundary,
    /// in which case move to the previous business day.
    #[default]
    ModifiedFollowing,

    /// Move to the previous business day.
    Preceding,

    /// Move to the previous business day unless that crosses a month
    /// boundary, in which case move to the next business day.
    ModifiedPreceding,

    /// Do not adjust the date.
    Unadjusted,
}

impl BusinessDayConvention {
    /// Returns the convention name.
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        }
    }

    /// Returns the short market code.
    pub fn code(&self) -> &'static str {
        match self {
            BusinessDayConvention::Following => "F",
            BusinessDayConvention::ModifiedFollowing => "MF",
            BusinessDayConvention::Preceding => "P",
            BusinessDayConvention::ModifiedPreceding => "MP",
            BusinessDayConvention::Unadjusted => "U",
        }
    }

    /// Rolls `date` onto a business day of `calendar`.
    ///
    /// Business days are returned unchanged for every convention.
    pub fn adjust(&self, date: Date, calendar: Calendar) -> Result<Date, DateError> {
        match self {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => calendar.next_business_day(date),
            BusinessDayConvention::Preceding => calendar.previous_business_day(date),
            BusinessDayConvention::ModifiedFollowing => {
                let following = calendar.next_business_day(date)?;
                if following.month() != date.month() {
                    calendar.previous_business_day(date)
                } else {
                    Ok(following)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let preceding = calendar.previous_business_day(date)?;
                if preceding.month() != date.month() {
                    calendar.next_business_day(date)
                } else {
                    Ok(preceding)
                }
            }
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = ConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modifiedpreceding" | "mp" => Ok(BusinessDayConvention::ModifiedPreceding),
            "unadjusted" | "u" | "none" => Ok(BusinessDayConvention::Unadjusted),
            _ => Err(ConventionError::UnknownBusinessDayConvention(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{BusinessDayConvention, DayCountConvention};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }

    impl Serialize for BusinessDayConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for BusinessDayConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            BusinessDayConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_act_365_known_dates() {
        let yf = DayCountConvention::Actual365Fixed.year_fraction_dates(
            date(2024, 1, 1),
            date(2025, 1, 1),
        );
        // 2024 is a leap year
        assert_relative_eq!(yf, 366.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act_360_known_dates() {
        let yf = DayCountConvention::Actual360.year_fraction_dates(date(2024, 1, 1), date(2025, 1, 1));
        assert_relative_eq!(yf, 366.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thirty_360_full_year() {
        let yf = DayCountConvention::Thirty360.year_fraction_dates(date(2024, 3, 15), date(2025, 3, 15));
        assert_relative_eq!(yf, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thirty_360_with_31st_days() {
        // 31st start day is treated as 30th, and so is the end when start is 30
        let yf = DayCountConvention::Thirty360.year_fraction_dates(date(2024, 1, 31), date(2024, 3, 31));
        assert_relative_eq!(yf, 60.0 / 360.0, epsilon = 1e-12);

        // End on 31st with start before the 30th keeps 31
        let yf = DayCountConvention::Thirty360.year_fraction_dates(date(2024, 1, 15), date(2024, 3, 31));
        assert_relative_eq!(yf, 76.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_same_date_returns_zero() {
        for dc in [
            DayCountConvention::Actual365Fixed,
            DayCountConvention::Actual360,
            DayCountConvention::Thirty360,
        ] {
            assert_eq!(dc.year_fraction_dates(date(2024, 5, 5), date(2024, 5, 5)), 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "start date must be less than or equal to end date")]
    fn test_year_fraction_panics_on_reverse_dates() {
        DayCountConvention::Actual360.year_fraction(
            date(2025, 1, 1).into_inner(),
            date(2024, 1, 1).into_inner(),
        );
    }

    #[test]
    fn test_year_fraction_dates_negative() {
        let dc = DayCountConvention::Thirty360;
        let forward = dc.year_fraction_dates(date(2024, 1, 31), date(2024, 6, 30));
        let backward = dc.year_fraction_dates(date(2024, 6, 30), date(2024, 1, 31));
        assert_relative_eq!(forward, -backward, epsilon = 1e-15);
    }

    #[test]
    fn test_date_from_ymd_invalid() {
        let err = Date::from_ymd(2023, 2, 29).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn test_date_parse() {
        assert_eq!(Date::parse("2024-06-15").unwrap(), date(2024, 6, 15));
        assert!(Date::parse("15/06/2024").is_err());
        assert!("2024-13-01".parse::<Date>().is_err());
    }

    #[test]
    fn test_date_display() {
        assert_eq!(format!("{}", date(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(date(2024, 1, 31).add_months(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).add_months(1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 2, 29).add_years(1).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_add_days_both_directions() {
        assert_eq!(date(2024, 3, 1).add_days(-1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 12, 31).add_days(1).unwrap(), date(2025, 1, 1));
    }

    #[test]
    fn test_dcc_from_str() {
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual360
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
        assert_eq!(
            "ACT/365F".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Actual365Fixed
        );
        assert!("ACT/ACT".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_bdc_from_str() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "mp".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedPreceding
        );
        assert!("sideways".parse::<BusinessDayConvention>().is_err());
    }

    #[test]
    fn test_adjust_business_day_is_identity() {
        let wednesday = date(2024, 6, 12);
        for bdc in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
            BusinessDayConvention::Unadjusted,
        ] {
            assert_eq!(bdc.adjust(wednesday, Calendar::WeekendsOnly).unwrap(), wednesday);
        }
    }

    #[test]
    fn test_adjust_following_and_preceding() {
        let saturday = date(2024, 6, 15);
        let cal = Calendar::WeekendsOnly;
        assert_eq!(
            BusinessDayConvention::Following.adjust(saturday, cal).unwrap(),
            date(2024, 6, 17)
        );
        assert_eq!(
            BusinessDayConvention::Preceding.adjust(saturday, cal).unwrap(),
            date(2024, 6, 14)
        );
        assert_eq!(
            BusinessDayConvention::Unadjusted.adjust(saturday, cal).unwrap(),
            saturday
        );
    }

    #[test]
    fn test_modified_preceding_crosses_back_into_month() {
        // Sunday 1 September 2024: preceding would land in August
        let sunday = date(2024, 9, 1);
        let rolled = BusinessDayConvention::ModifiedPreceding
            .adjust(sunday, Calendar::WeekendsOnly)
            .unwrap();
        assert_eq!(rolled, date(2024, 9, 2));
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_date_serde_roundtrip() {
            let d = date(2024, 6, 15);
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, "\"2024-06-15\"");
            let back: Date = serde_json::from_str(&json).unwrap();
            assert_eq!(back, d);
        }

        #[test]
        fn test_conventions_deserialize_aliases() {
            let dc: DayCountConvention = serde_json::from_str("\"A360\"").unwrap();
            assert_eq!(dc, DayCountConvention::Actual360);
            let bdc: BusinessDayConvention = serde_json::from_str("\"MF\"").unwrap();
            assert_eq!(bdc, BusinessDayConvention::ModifiedFollowing);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (2000i32..2100i32, 1u32..13u32, 1u32..29u32)
                .prop_filter_map("valid date", |(y, m, d)| Date::from_ymd(y, m, d).ok())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_act_360_vs_act_365_ratio(start in date_strategy(), end in date_strategy()) {
                prop_assume!(start < end);
                let a365 = DayCountConvention::Actual365Fixed.year_fraction_dates(start, end);
                let a360 = DayCountConvention::Actual360.year_fraction_dates(start, end);
                prop_assert!((a365 / a360 - 360.0 / 365.0).abs() < 1e-10);
            }

            #[test]
            fn test_modified_following_stays_in_month(d in date_strategy()) {
                let rolled = BusinessDayConvention::ModifiedFollowing
                    .adjust(d, Calendar::UnitedStatesSettlement)
                    .unwrap();
                prop_assert_eq!(rolled.month(), d.month());
                prop_assert!(Calendar::UnitedStatesSettlement.is_business_day(rolled));
            }
        }
    }
}
