//! Bootstrap configuration types.
//!
//! Conventions used to turn deposit quotes into dated curve nodes and the
//! checks applied to the resulting discount factors.

use pricer_core::market_data::CurveInterpolation;
use pricer_core::types::{BusinessDayConvention, Calendar, DayCountConvention};

/// Configuration for deposit curve bootstrapping.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::CurveInterpolation;
/// use pricer_core::types::DayCountConvention;
/// use pricer_optimiser::bootstrapping::BootstrapConfig;
///
/// let config = BootstrapConfig::default();
/// assert_eq!(config.day_count, DayCountConvention::Actual360);
/// assert!(config.negative_forward_guard);
///
/// let config = BootstrapConfig::default()
///     .with_interpolation(CurveInterpolation::LinearZero)
///     .with_negative_forward_guard(false);
/// assert!(!config.negative_forward_guard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BootstrapConfig {
    /// Day count for quote accrual and curve times.
    ///
    /// Default: ACT/360
    pub day_count: DayCountConvention,

    /// Calendar used to roll quote maturities.
    ///
    /// Default: US settlement
    pub calendar: Calendar,

    /// Business day convention used to roll quote maturities.
    ///
    /// Default: Modified Following
    pub convention: BusinessDayConvention,

    /// Interpolation method for the resulting curve.
    ///
    /// Default: LogLinear
    pub interpolation: CurveInterpolation,

    /// Reject curves whose discount factors increase between nodes.
    ///
    /// Default: true
    pub negative_forward_guard: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            day_count: DayCountConvention::Actual360,
            calendar: Calendar::UnitedStatesSettlement,
            convention: BusinessDayConvention::ModifiedFollowing,
            interpolation: CurveInterpolation::LogLinear,
            negative_forward_guard: true,
        }
    }
}

impl BootstrapConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the day count.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Set the holiday calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Set the business day convention.
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Set the interpolation method.
    pub fn with_interpolation(mut self, interpolation: CurveInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Enable or disable the negative forward check.
    pub fn with_negative_forward_guard(mut self, enabled: bool) -> Self {
        self.negative_forward_guard = enabled;
        self
    }
}
