//! Portfolio orchestration: quotes in, priced report out.
//!
//! One request builds the curve once, constructs the three instruments
//! (spot payer swap, European swaption, Bermudan swaption on a forward
//! swap) and values them against the shared curve. Any failure aborts the
//! whole request.

use std::time::Instant;

use pricer_core::market_data::DiscountCurve;
use pricer_core::types::Date;
use pricer_models::instruments::rates::{
    BermudanSwaption, EuropeanSwaption, InterestRateSwap, RatesInstrument, SwapBuilder,
    SwapDirection,
};
use pricer_optimiser::bootstrapping::{DepositBootstrapper, DepositQuote};
use tracing::{debug, info, info_span, warn};

use crate::config::PortfolioConfig;
use crate::error::PortfolioError;
use crate::parallel::try_map_ordered;
use crate::quotes::validate_quotes;
use crate::report::{PortfolioReport, ReportRow};

/// Prices the fixed demonstration portfolio against a bootstrapped curve.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_portfolio::{PortfolioConfig, PortfolioPricer, BASELINE_QUOTES};
///
/// let pricer = PortfolioPricer::new(PortfolioConfig::default()).unwrap();
/// let valuation = Date::from_ymd(2025, 1, 2).unwrap();
/// let report = pricer.price(valuation, &BASELINE_QUOTES).unwrap();
///
/// let types: Vec<_> = report.rows.iter().map(|r| r.instrument_type.as_str()).collect();
/// assert_eq!(types, ["Swap", "European Swaption", "Bermudan Swaption"]);
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioPricer {
    config: PortfolioConfig,
}

impl PortfolioPricer {
    /// Create a pricer after validating `config`.
    pub fn new(config: PortfolioConfig) -> Result<Self, PortfolioError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Prices the portfolio for `valuation` given percentage `quotes`.
    pub fn price(&self, valuation: Date, quotes: &[f64]) -> Result<PortfolioReport, PortfolioError> {
        let span = info_span!("price_portfolio", valuation_date = %valuation, quotes = quotes.len());
        let _guard = span.enter();
        let started = Instant::now();

        if let Err(err) = validate_quotes(quotes, &self.config) {
            warn!(error = %err, "rejected quotes");
            return Err(err);
        }
        info!("pricing portfolio");

        let curve = self.build_curve(valuation, quotes)?;
        let instruments = self.build_instruments(valuation)?;

        let rows = try_map_ordered(&instruments, self.config.parallel, |instrument| {
            let t0 = Instant::now();
            let npv = instrument.value(&curve)?;
            debug!(
                instrument = instrument.type_name(),
                npv,
                elapsed_us = t0.elapsed().as_micros() as u64,
                "valued instrument"
            );
            Ok::<_, PortfolioError>(ReportRow {
                instrument_type: instrument.type_name().to_string(),
                npv,
            })
        })?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "portfolio priced"
        );
        Ok(PortfolioReport {
            valuation_date: valuation,
            rows,
        })
    }

    /// Bootstraps the discount curve from percentage quotes.
    pub fn build_curve(&self, valuation: Date, quotes: &[f64]) -> Result<DiscountCurve<f64>, PortfolioError> {
        let quotes = DepositQuote::from_percentages(quotes);
        let result = DepositBootstrapper::new(self.config.curve).bootstrap(valuation, &quotes)?;
        debug!(
            nodes = result.curve.node_count(),
            max_residual = result.max_residual(),
            "curve bootstrapped"
        );
        Ok(result.curve)
    }

    /// Constructs the portfolio in report order.
    pub fn build_instruments(&self, valuation: Date) -> Result<Vec<RatesInstrument>, PortfolioError> {
        let cfg = &self.config;
        let maturity = valuation.add_years(cfg.swap_tenor_years).map_err(date_error)?;
        let forward_start = cfg
            .curve
            .convention
            .adjust(
                valuation.add_years(cfg.forward_start_years).map_err(date_error)?,
                cfg.curve.calendar,
            )
            .map_err(date_error)?;

        let spot_swap = self.payer_swap(valuation, maturity)?;
        let forward_swap = self.payer_swap(forward_start, maturity)?;

        let european = EuropeanSwaption::new(forward_swap.clone(), forward_start, cfg.european_volatility)?;

        let exercise_dates = forward_swap.fixed_leg().schedule().accrual_start_dates();
        let bermudan = BermudanSwaption::new(forward_swap, exercise_dates, cfg.hull_white, cfg.lattice)?;

        Ok(vec![spot_swap.into(), european.into(), bermudan.into()])
    }

    fn payer_swap(&self, start: Date, maturity: Date) -> Result<InterestRateSwap<f64>, PortfolioError> {
        let cfg = &self.config;
        Ok(SwapBuilder::new()
            .start(start)
            .maturity(maturity)
            .notional(cfg.notional)
            .fixed_rate(cfg.fixed_rate_pct / 100.0)
            .direction(SwapDirection::PayFixed)
            .calendar(cfg.curve.calendar)
            .convention(cfg.curve.convention)
            .build()?)
    }
}

fn date_error(err: pricer_core::types::DateError) -> PortfolioError {
    PortfolioError::InvalidInput(format!("valuation date out of range: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::BASELINE_QUOTES;
    use approx::assert_relative_eq;

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    fn pricer() -> PortfolioPricer {
        PortfolioPricer::new(PortfolioConfig::default()).unwrap()
    }

    #[test]
    fn test_instruments_in_report_order() {
        let instruments = pricer().build_instruments(valuation()).unwrap();
        let names: Vec<_> = instruments.iter().map(|i| i.type_name()).collect();
        assert_eq!(names, ["Swap", "European Swaption", "Bermudan Swaption"]);
        for i in &instruments {
            assert_eq!(i.maturity_date(), Date::from_ymd(2030, 1, 2).unwrap());
        }
    }

    #[test]
    fn test_bermudan_exercises_annually_from_forward_start() {
        let instruments = pricer().build_instruments(valuation()).unwrap();
        let RatesInstrument::BermudanSwaption(bermudan) = &instruments[2] else {
            panic!("expected a Bermudan swaption");
        };
        let expected = [
            Date::from_ymd(2026, 1, 2).unwrap(),
            Date::from_ymd(2027, 1, 4).unwrap(),
            Date::from_ymd(2028, 1, 3).unwrap(),
            Date::from_ymd(2029, 1, 2).unwrap(),
        ];
        assert_eq!(bermudan.exercise_dates(), expected);
    }

    #[test]
    fn test_baseline_report() {
        let report = pricer().price(valuation(), &BASELINE_QUOTES).unwrap();
        assert_eq!(report.len(), 3);
        assert!(report.rows.iter().all(|r| r.npv.is_finite()));

        let swap = report.npv_of("Swap").unwrap();
        let european = report.npv_of("European Swaption").unwrap();
        let bermudan = report.npv_of("Bermudan Swaption").unwrap();
        assert!(swap > 0.0);
        assert!(european > 0.0);
        assert!(bermudan >= european);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = PortfolioPricer::new(PortfolioConfig {
            parallel: false,
            ..PortfolioConfig::default()
        })
        .unwrap();
        let a = pricer().price(valuation(), &BASELINE_QUOTES).unwrap();
        let b = sequential.price(valuation(), &BASELINE_QUOTES).unwrap();
        for (x, y) in a.rows.iter().zip(&b.rows) {
            assert_eq!(x.instrument_type, y.instrument_type);
            assert_relative_eq!(x.npv, y.npv, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_invalid_quotes_abort() {
        let err = pricer().price(valuation(), &[5.0, f64::NAN]).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputError");
        let err = pricer().price(valuation(), &[]).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputError");
    }

    #[test]
    fn test_zero_quotes_price_out_of_the_money_options() {
        let report = pricer().price(valuation(), &[0.0; 5]).unwrap();
        assert!(report.rows.iter().all(|r| r.npv.is_finite()));
        assert!(report.npv_of("Swap").unwrap() < 0.0);

        let european = report.npv_of("European Swaption").unwrap();
        let bermudan = report.npv_of("Bermudan Swaption").unwrap();
        assert_eq!(european, 0.0);
        assert!(bermudan >= european);
    }

    #[test]
    fn test_negative_first_quote_is_calibration_error() {
        let err = pricer().price(valuation(), &[-1.0, 5.0, 5.1]).unwrap_err();
        assert_eq!(err.kind(), "CurveCalibrationError");
    }

    #[test]
    fn test_inverted_curve_is_calibration_error() {
        let err = pricer().price(valuation(), &[9.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err.kind(), "CurveCalibrationError");
    }

    #[test]
    fn test_lattice_budget_is_lattice_error() {
        let mut config = PortfolioConfig::default();
        config.lattice.max_steps = 50;
        let err = PortfolioPricer::new(config)
            .unwrap()
            .price(valuation(), &BASELINE_QUOTES)
            .unwrap_err();
        assert_eq!(err.kind(), "LatticeCalibrationError");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PortfolioConfig {
            notional: 0.0,
            ..PortfolioConfig::default()
        };
        assert!(matches!(
            PortfolioPricer::new(config),
            Err(PortfolioError::Config(_))
        ));
    }
}
