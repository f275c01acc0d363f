//! Sequential deposit bootstrapping engine.
//!
//! Quotes are stripped in increasing maturity. Each deposit fixes the
//! discount factor at its own maturity in closed form, so no root finding is
//! needed; the engine validates the quotes, checks the resulting nodes and
//! reports the calibration residuals.

use num_traits::Float;
use pricer_core::market_data::DiscountCurve;
use pricer_core::types::Date;

use super::config::BootstrapConfig;
use super::error::BootstrapError;
use super::instrument::DepositQuote;

/// Result of a bootstrap operation.
#[derive(Debug, Clone)]
pub struct BootstrapResult<T: Float> {
    /// The bootstrapped curve
    pub curve: DiscountCurve<T>,
    /// Node dates (rolled quote maturities)
    pub pillars: Vec<Date>,
    /// Discount factors at each pillar
    pub discount_factors: Vec<T>,
    /// Curve-implied rate minus quoted rate, per quote
    pub residuals: Vec<T>,
}

impl<T: Float> BootstrapResult<T> {
    /// Largest absolute residual.
    pub fn max_residual(&self) -> T {
        self.residuals
            .iter()
            .fold(T::zero(), |acc, r| acc.max(r.abs()))
    }
}

/// Deposit curve bootstrapper.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::YieldCurve;
/// use pricer_core::types::Date;
/// use pricer_optimiser::bootstrapping::{BootstrapConfig, DepositBootstrapper, DepositQuote};
///
/// let valuation = Date::from_ymd(2025, 1, 2).unwrap();
/// let quotes = DepositQuote::<f64>::from_percentages(&[5.0, 5.1, 5.2, 5.3, 5.4]);
///
/// let bootstrapper = DepositBootstrapper::new(BootstrapConfig::default());
/// let result = bootstrapper.bootstrap(valuation, &quotes).unwrap();
///
/// assert_eq!(result.pillars.len(), 5);
/// assert_eq!(result.curve.discount(valuation).unwrap(), 1.0);
/// assert!(result.max_residual() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DepositBootstrapper {
    /// Bootstrap configuration
    config: BootstrapConfig,
}

impl DepositBootstrapper {
    /// Create a new bootstrapper.
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Create a bootstrapper with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(BootstrapConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstrap a discount curve anchored at `valuation`.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` for an empty quote set
    /// - `NonIncreasingMaturity` if maturities are not strictly increasing
    /// - `InvalidRate` for a non-finite rate or one at or below -100%
    /// - `NonPositiveDiscountFactor` if a quote implies DF <= 0
    /// - `NegativeForward` when a DF rises and the guard is on
    pub fn bootstrap<T: Float>(
        &self,
        valuation: Date,
        quotes: &[DepositQuote<T>],
    ) -> Result<BootstrapResult<T>, BootstrapError> {
        self.validate_quotes(quotes)?;

        let mut pillars: Vec<Date> = Vec::with_capacity(quotes.len());
        let mut discount_factors: Vec<T> = Vec::with_capacity(quotes.len());

        for quote in quotes {
            let maturity = quote.maturity_date(valuation, &self.config)?;
            let df = quote.discount_factor(quote.accrual(valuation, &self.config)?);

            if !df.is_finite() || df <= T::zero() {
                return Err(BootstrapError::NonPositiveDiscountFactor {
                    maturity,
                    df: df.to_f64().unwrap_or(f64::NAN),
                });
            }

            // DFs must be non-increasing from D(valuation) = 1
            if self.config.negative_forward_guard {
                let previous = discount_factors.last().copied().unwrap_or_else(T::one);
                if df > previous {
                    return Err(BootstrapError::NegativeForward {
                        maturity,
                        previous: previous.to_f64().unwrap_or(f64::NAN),
                        current: df.to_f64().unwrap_or(f64::NAN),
                    });
                }
            }

            pillars.push(maturity);
            discount_factors.push(df);
        }

        let curve = DiscountCurve::new(
            valuation,
            self.config.day_count,
            pillars.clone(),
            discount_factors.clone(),
            self.config.interpolation,
        )?;

        let residuals = quotes
            .iter()
            .map(|q| q.residual(&curve, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BootstrapResult {
            curve,
            pillars,
            discount_factors,
            residuals,
        })
    }

    /// Validate input quotes.
    fn validate_quotes<T: Float>(&self, quotes: &[DepositQuote<T>]) -> Result<(), BootstrapError> {
        if quotes.is_empty() {
            return Err(BootstrapError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let mut previous_years = 0;
        for (index, quote) in quotes.iter().enumerate() {
            let rate = quote.rate();
            if !rate.is_finite() || rate <= -T::one() {
                return Err(BootstrapError::InvalidRate {
                    index,
                    rate: rate.to_f64().unwrap_or(f64::NAN),
                });
            }
            if quote.years() <= previous_years {
                return Err(BootstrapError::NonIncreasingMaturity {
                    index,
                    years: quote.years(),
                });
            }
            previous_years = quote.years();
        }

        Ok(())
    }
}
