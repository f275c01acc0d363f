//! Payment frequency enumeration.

use super::error::ScheduleError;
use std::fmt;
use std::str::FromStr;

/// Payment frequency for scheduled instruments.
///
/// Every frequency is a whole number of months so that schedules stay on
/// the same day of month as the start date before rolling.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let freq = Frequency::Quarterly;
/// assert_eq!(freq.periods_per_year(), 4);
/// assert_eq!(freq.months_between_payments(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Frequency {
    /// Once per year.
    #[default]
    Annual,
    /// Twice per year.
    SemiAnnual,
    /// Every four months.
    EveryFourthMonth,
    /// Four times per year.
    Quarterly,
    /// Every two months.
    Bimonthly,
    /// Twelve times per year.
    Monthly,
}

impl Frequency {
    /// Frequency from a payment count per year.
    ///
    /// # Errors
    ///
    /// `ScheduleError::InvalidFrequency` if `n` is not positive or does not
    /// divide twelve.
    ///
    /// ```
    /// use pricer_models::schedules::Frequency;
    ///
    /// assert_eq!(Frequency::from_payments_per_year(2).unwrap(), Frequency::SemiAnnual);
    /// assert!(Frequency::from_payments_per_year(0).is_err());
    /// assert!(Frequency::from_payments_per_year(5).is_err());
    /// ```
    pub fn from_payments_per_year(n: i32) -> Result<Self, ScheduleError> {
        match n {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            3 => Ok(Frequency::EveryFourthMonth),
            4 => Ok(Frequency::Quarterly),
            6 => Ok(Frequency::Bimonthly),
            12 => Ok(Frequency::Monthly),
            _ => Err(ScheduleError::InvalidFrequency {
                payments_per_year: n,
            }),
        }
    }

    /// Returns the number of payment periods per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        12 / self.months_between_payments()
    }

    /// Returns the number of months between payment dates.
    #[inline]
    pub fn months_between_payments(&self) -> u32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::EveryFourthMonth => 4,
            Frequency::Quarterly => 3,
            Frequency::Bimonthly => 2,
            Frequency::Monthly => 1,
        }
    }

    /// Returns the standard name for this frequency.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::EveryFourthMonth => "Every-Fourth-Month",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = String;

    /// Parses frequency from string (case-insensitive), either a name
    /// ("annual", "semi-annual") or a tenor ("12m", "6m", "1y").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "1y" | "yearly" | "12m" => Ok(Frequency::Annual),
            "semiannual" | "6m" => Ok(Frequency::SemiAnnual),
            "everyfourthmonth" | "4m" => Ok(Frequency::EveryFourthMonth),
            "quarterly" | "3m" => Ok(Frequency::Quarterly),
            "bimonthly" | "2m" => Ok(Frequency::Bimonthly),
            "monthly" | "1m" => Ok(Frequency::Monthly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_and_months_agree() {
        for n in [1, 2, 3, 4, 6, 12] {
            let freq = Frequency::from_payments_per_year(n).unwrap();
            assert_eq!(freq.periods_per_year(), n as u32);
            assert_eq!(freq.months_between_payments() * freq.periods_per_year(), 12);
        }
    }

    #[test]
    fn test_from_payments_per_year_rejects_invalid() {
        for n in [-1, 0, 5, 7, 24] {
            assert_eq!(
                Frequency::from_payments_per_year(n),
                Err(ScheduleError::InvalidFrequency {
                    payments_per_year: n
                })
            );
        }
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!("annual".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!("1Y".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert_eq!(
            "semi-annual".parse::<Frequency>().unwrap(),
            Frequency::SemiAnnual
        );
        assert_eq!("3m".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("weekly".parse::<Frequency>().is_err());
        assert!("biweekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Frequency::Annual), "Annual");
        assert_eq!(format!("{}", Frequency::SemiAnnual), "Semi-Annual");
    }
}
