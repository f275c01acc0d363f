//! Integration tests for module exports.
//!
//! Verify that public modules and types are accessible via absolute paths.

#[test]
fn test_types_module_exports() {
    use pricer_core::types::calendar::Calendar;
    use pricer_core::types::time::{BusinessDayConvention, Date, DayCountConvention};

    let start = Date::from_ymd(2024, 1, 1).unwrap();
    let end = Date::from_ymd(2024, 7, 1).unwrap();
    let yf = DayCountConvention::Actual360.year_fraction_dates(start, end);
    assert!(yf > 0.5);

    // New Year's Day is not a US settlement business day
    let rolled = BusinessDayConvention::Following
        .adjust(start, Calendar::UnitedStatesSettlement)
        .unwrap();
    assert_eq!(rolled, Date::from_ymd(2024, 1, 2).unwrap());
}

#[test]
fn test_error_exports() {
    use pricer_core::market_data::MarketDataError;
    use pricer_core::types::{ConventionError, DateError, PricingError};

    let _ = DateError::ParseError("x".to_string());
    let _ = ConventionError::UnknownCalendar("x".to_string());
    let pricing: PricingError = MarketDataError::InvalidMaturity { t: -1.0 }.into();
    assert!(pricing.to_string().contains("Invalid maturity"));
}

#[test]
fn test_curve_exports() {
    use pricer_core::market_data::curves::{CurveInterpolation, DiscountCurve, YieldCurve};
    use pricer_core::types::{Date, DayCountConvention};

    let today = Date::from_ymd(2024, 1, 2).unwrap();
    let curve: DiscountCurve<f64> = DiscountCurve::new(
        today,
        DayCountConvention::Actual360,
        vec![Date::from_ymd(2025, 1, 2).unwrap()],
        vec![0.95],
        CurveInterpolation::default(),
    )
    .unwrap();

    fn generic_df<C: YieldCurve<f64>>(curve: &C, date: Date) -> f64 {
        curve.discount(date).unwrap()
    }
    assert_eq!(generic_df(&curve, today), 1.0);
}
