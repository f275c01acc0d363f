//! End-to-end portfolio pricing: raw quotes to report.

use pricer_core::market_data::YieldCurve;
use pricer_core::types::Date;
use pricer_models::instruments::rates::value_swap;
use pricer_portfolio::{parse_quotes, PortfolioConfig, PortfolioPricer, BASELINE_QUOTES};

fn valuation() -> Date {
    Date::from_ymd(2025, 1, 2).unwrap()
}

fn pricer() -> PortfolioPricer {
    PortfolioPricer::new(PortfolioConfig::default()).unwrap()
}

#[test]
fn test_baseline_portfolio() {
    let report = pricer().price(valuation(), &BASELINE_QUOTES).unwrap();

    assert_eq!(report.valuation_date, valuation());
    let types: Vec<_> = report.rows.iter().map(|r| r.instrument_type.as_str()).collect();
    assert_eq!(types, ["Swap", "European Swaption", "Bermudan Swaption"]);
    assert!(report.rows.iter().all(|r| r.npv.is_finite()));

    let european = report.npv_of("European Swaption").unwrap();
    let bermudan = report.npv_of("Bermudan Swaption").unwrap();
    assert!(european >= 0.0);
    assert!(bermudan >= european);
}

#[test]
fn test_raw_form_values_round_trip() {
    let config = PortfolioConfig::default();
    let quotes = parse_quotes(&["5.0", "5.1", "5.2", "5.3", "5.4"], &config).unwrap();
    let from_text = pricer().price(valuation(), &quotes).unwrap();
    let from_numbers = pricer().price(valuation(), &BASELINE_QUOTES).unwrap();
    assert_eq!(from_text, from_numbers);
}

#[test]
fn test_non_numeric_quote_gives_no_report() {
    let config = PortfolioConfig::default();
    let err = parse_quotes(&["5.0", "five"], &config).unwrap_err();
    assert_eq!(err.kind(), "InvalidInputError");
}

#[test]
fn test_swap_row_matches_direct_valuation() {
    let pricer = pricer();
    let curve = pricer.build_curve(valuation(), &BASELINE_QUOTES).unwrap();
    assert_eq!(curve.discount(valuation()).unwrap(), 1.0);

    let instruments = pricer.build_instruments(valuation()).unwrap();
    let swap = instruments[0].as_swap().unwrap();
    let direct = value_swap(swap, &curve).unwrap().npv;

    let report = pricer.price(valuation(), &BASELINE_QUOTES).unwrap();
    assert_eq!(report.npv_of("Swap").unwrap(), direct);
}

#[test]
fn test_higher_rates_raise_payer_values() {
    let low = pricer().price(valuation(), &BASELINE_QUOTES).unwrap();
    let high = pricer()
        .price(valuation(), &[6.0, 6.1, 6.2, 6.3, 6.4])
        .unwrap();
    for ty in ["Swap", "European Swaption", "Bermudan Swaption"] {
        assert!(high.npv_of(ty).unwrap() > low.npv_of(ty).unwrap(), "{}", ty);
    }
}

#[test]
fn test_single_quote_curve_extrapolates() {
    let report = pricer().price(valuation(), &[4.0]).unwrap();
    assert!(report.rows.iter().all(|r| r.npv.is_finite()));
}

#[test]
fn test_thirty_quotes_accepted_thirty_one_rejected() {
    let pricer = pricer();
    assert!(pricer.price(valuation(), &[5.0; 30]).is_ok());
    let err = pricer.price(valuation(), &[5.0; 31]).unwrap_err();
    assert_eq!(err.kind(), "InvalidInputError");
}
