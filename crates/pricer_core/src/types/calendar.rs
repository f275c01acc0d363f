//! Holiday calendars for business day calculations.
//!
//! Calendars are plain enum values; every query is a pure function of the
//! date, so they can be copied freely into schedules and curve builders.

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

use super::error::{ConventionError, DateError};
use super::time::{BusinessDayConvention, Date};

/// Holiday calendar identifier.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Calendar, Date};
///
/// let cal = Calendar::UnitedStatesSettlement;
/// // Independence Day 2024 (Thursday)
/// assert!(!cal.is_business_day(Date::from_ymd(2024, 7, 4).unwrap()));
/// assert!(cal.is_business_day(Date::from_ymd(2024, 7, 5).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Calendar {
    /// Every day is a business day.
    NullCalendar,
    /// Saturdays and Sundays are the only non-business days.
    WeekendsOnly,
    /// United States settlement calendar (federal holidays).
    #[default]
    UnitedStatesSettlement,
}

impl Calendar {
    /// Returns the calendar name.
    pub fn name(&self) -> &'static str {
        match self {
            Calendar::NullCalendar => "Null",
            Calendar::WeekendsOnly => "WeekendsOnly",
            Calendar::UnitedStatesSettlement => "UnitedStates/Settlement",
        }
    }

    /// Check if a date falls on a weekend for this calendar.
    pub fn is_weekend(&self, date: Date) -> bool {
        match self {
            Calendar::NullCalendar => false,
            _ => matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    /// Check if a date is a holiday (excluding weekends).
    pub fn is_holiday(&self, date: Date) -> bool {
        match self {
            Calendar::NullCalendar | Calendar::WeekendsOnly => false,
            Calendar::UnitedStatesSettlement => is_us_settlement_holiday(date),
        }
    }

    /// Check if a date is a business day.
    pub fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Rolls `date` under `convention` on this calendar.
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date, DateError> {
        convention.adjust(date, *self)
    }

    /// First business day on or after `date`.
    pub fn next_business_day(&self, mut date: Date) -> Result<Date, DateError> {
        while !self.is_business_day(date) {
            date = date.add_days(1)?;
        }
        Ok(date)
    }

    /// Last business day on or before `date`.
    pub fn previous_business_day(&self, mut date: Date) -> Result<Date, DateError> {
        while !self.is_business_day(date) {
            date = date.add_days(-1)?;
        }
        Ok(date)
    }

    /// Moves `days` business days forward (or backward when negative).
    ///
    /// Zero days rolls a non-business day forward to the next business day.
    pub fn advance_business_days(&self, mut date: Date, days: i32) -> Result<Date, DateError> {
        if days == 0 {
            return self.next_business_day(date);
        }

        let step: i64 = if days > 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();

        while remaining > 0 {
            date = date.add_days(step)?;
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }

        Ok(date)
    }
}

/// US federal holidays observed by the settlement calendar.
///
/// Fixed-date holidays falling on Saturday are observed the Friday before
/// and on Sunday the Monday after. New Year's Day on a Saturday is observed
/// on Friday 31 December.
fn is_us_settlement_holiday(date: Date) -> bool {
    let (y, m, d, w) = (date.year(), date.month(), date.day(), date.weekday());

    let observed = |month: u32, day: u32| {
        m == month
            && (d == day
                || (d == day + 1 && w == Weekday::Mon)
                || (d + 1 == day && w == Weekday::Fri))
    };

    // New Year's Day (Friday 31 Dec when 1 Jan is a Saturday)
    (m == 1 && (d == 1 || (d == 2 && w == Weekday::Mon)))
        || (m == 12 && d == 31 && w == Weekday::Fri)
        // Martin Luther King Jr. Day, third Monday of January
        || (y >= 1983 && m == 1 && (15..=21).contains(&d) && w == Weekday::Mon)
        // Washington's Birthday, third Monday of February
        || (m == 2 && (15..=21).contains(&d) && w == Weekday::Mon)
        // Memorial Day, last Monday of May
        || (m == 5 && d >= 25 && w == Weekday::Mon)
        // Juneteenth
        || (y >= 2022 && observed(6, 19))
        // Independence Day
        || observed(7, 4)
        // Labor Day, first Monday of September
        || (m == 9 && d <= 7 && w == Weekday::Mon)
        // Columbus Day, second Monday of October
        || (m == 10 && (8..=14).contains(&d) && w == Weekday::Mon)
        // Veterans Day
        || observed(11, 11)
        // Thanksgiving, fourth Thursday of November
        || (m == 11 && (22..=28).contains(&d) && w == Weekday::Thu)
        // Christmas
        || observed(12, 25)
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Calendar {
    type Err = ConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-', '/'], "").as_str() {
            "null" | "nullcalendar" | "none" => Ok(Calendar::NullCalendar),
            "weekendsonly" | "weekends" => Ok(Calendar::WeekendsOnly),
            "unitedstatessettlement" | "unitedstates" | "ussettlement" | "us" => {
                Ok(Calendar::UnitedStatesSettlement)
            }
            _ => Err(ConventionError::UnknownCalendar(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Calendar;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Calendar {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for Calendar {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Calendar::from_str(&s).map_err(de::Error::custom)
        }
    }
}
