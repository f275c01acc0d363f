//! Integration tests for discount curve bootstrapping.
//!
//! Quotes in, curve out, then the curve is queried through the
//! `YieldCurve` trait the way the pricing layer uses it.

use approx::assert_relative_eq;
use pricer_core::market_data::{CurveInterpolation, YieldCurve};
use pricer_core::types::{Date, DayCountConvention};
use pricer_optimiser::bootstrapping::{BootstrapConfig, DepositBootstrapper, DepositQuote};

fn valuation() -> Date {
    Date::from_ymd(2025, 1, 2).unwrap()
}

// ============================================================================
// End-to-End Bootstrap Flow Tests
// ============================================================================

#[test]
fn test_end_to_end_bootstrap_to_discounting() {
    let quotes = DepositQuote::<f64>::from_percentages(&[5.0, 5.1, 5.2, 5.3, 5.4]);
    let result = DepositBootstrapper::with_defaults()
        .bootstrap(valuation(), &quotes)
        .unwrap();
    let curve = &result.curve;

    assert_eq!(curve.reference_date(), valuation());
    assert_eq!(curve.day_count(), DayCountConvention::Actual360);

    // Between nodes: log-linear interpolation stays inside the node range
    let mid = Date::from_ymd(2027, 7, 1).unwrap();
    let df = curve.discount(mid).unwrap();
    assert!(df < result.discount_factors[1] && df > result.discount_factors[2]);

    // Beyond the last node: flat zero rate
    let t5 = curve.time_to(result.pillars[4]);
    let t7 = curve.time_to(Date::from_ymd(2032, 1, 2).unwrap());
    assert_relative_eq!(
        curve.zero_rate(t7).unwrap(),
        curve.zero_rate(t5).unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn test_forward_rates_positive_for_rising_quotes() {
    let quotes = DepositQuote::<f64>::from_percentages(&[5.0, 5.1, 5.2, 5.3, 5.4]);
    let curve = DepositBootstrapper::with_defaults()
        .bootstrap(valuation(), &quotes)
        .unwrap()
        .curve;

    let start = Date::from_ymd(2026, 1, 2).unwrap();
    let end = Date::from_ymd(2027, 1, 4).unwrap();
    let tau = DayCountConvention::Actual360.year_fraction_dates(start, end);
    let forward = curve.simple_forward_rate(start, end, tau).unwrap();
    assert!(forward > 0.05);
}

#[test]
fn test_both_interpolations_reprice_quotes() {
    let quotes = DepositQuote::<f64>::from_percentages(&[4.0, 4.5, 4.2, 4.8]);
    for interpolation in [CurveInterpolation::LogLinear, CurveInterpolation::LinearZero] {
        let config = BootstrapConfig::default().with_interpolation(interpolation);
        let bootstrapper = DepositBootstrapper::new(config);
        let result = bootstrapper.bootstrap(valuation(), &quotes).unwrap();
        for quote in &quotes {
            assert_relative_eq!(
                quote.implied_rate(&result.curve, bootstrapper.config()).unwrap(),
                quote.rate(),
                max_relative = 1e-8
            );
        }
    }
}

#[test]
fn test_thirty_year_curve() {
    let percentages: Vec<f64> = (0..30).map(|i| 3.0 + 0.05 * i as f64).collect();
    let quotes = DepositQuote::<f64>::from_percentages(&percentages);
    let result = DepositBootstrapper::with_defaults()
        .bootstrap(valuation(), &quotes)
        .unwrap();
    assert_eq!(result.curve.node_count(), 31);
    assert!(result.max_residual() < 1e-10);
}
