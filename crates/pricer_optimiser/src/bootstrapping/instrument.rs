//! Deposit quotes used for curve bootstrapping.
//!
//! A deposit quote pays simple interest from the valuation date to a whole
//! number of years later:
//!
//! ```text
//! DF(T) = 1 / (1 + r · τ(valuation, T))
//! ```
//!
//! with `T = valuation + N years` rolled on the configured calendar.

use num_traits::Float;
use pricer_core::market_data::YieldCurve;
use pricer_core::types::{Date, DateError};

use super::config::BootstrapConfig;
use super::error::BootstrapError;

/// Simply compounded deposit quote.
///
/// # Examples
///
/// ```
/// use pricer_optimiser::bootstrapping::DepositQuote;
///
/// let quote: DepositQuote<f64> = DepositQuote::new(5, 0.054);
/// assert_eq!(quote.years(), 5);
///
/// // Quotes from percentages, one per consecutive year
/// let quotes = DepositQuote::<f64>::from_percentages(&[5.0, 5.1]);
/// assert_eq!(quotes[1].years(), 2);
/// assert!((quotes[1].rate() - 0.051).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositQuote<T: Float> {
    /// Maturity in whole years from the valuation date
    years: u32,
    /// Simple rate as a decimal
    rate: T,
}

impl<T: Float> DepositQuote<T> {
    /// Create a quote for `years` at `rate` (decimal).
    pub fn new(years: u32, rate: T) -> Self {
        Self { years, rate }
    }

    /// One quote per year `1..=n`, rates given in percent.
    pub fn from_percentages(percentages: &[T]) -> Vec<Self> {
        let hundred = T::from(100.0).unwrap_or_else(T::one);
        percentages
            .iter()
            .zip(1u32..)
            .map(|(pct, years)| Self::new(years, *pct / hundred))
            .collect()
    }

    /// Maturity in years.
    pub fn years(&self) -> u32 {
        self.years
    }

    /// Quoted rate (decimal).
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Rolled maturity date.
    pub fn maturity_date(&self, valuation: Date, config: &BootstrapConfig) -> Result<Date, DateError> {
        config
            .convention
            .adjust(valuation.add_years(self.years)?, config.calendar)
    }

    /// Accrual fraction from valuation to the rolled maturity.
    pub fn accrual(&self, valuation: Date, config: &BootstrapConfig) -> Result<T, DateError> {
        let maturity = self.maturity_date(valuation, config)?;
        let tau = config.day_count.year_fraction_dates(valuation, maturity);
        Ok(T::from(tau).unwrap_or_else(T::nan))
    }

    /// Discount factor implied by the quote alone.
    pub fn discount_factor(&self, accrual: T) -> T {
        T::one() / (T::one() + self.rate * accrual)
    }

    /// Simple rate implied by `curve` over this quote's period.
    pub fn implied_rate<C>(&self, curve: &C, config: &BootstrapConfig) -> Result<T, BootstrapError>
    where
        C: YieldCurve<T> + ?Sized,
    {
        let valuation = curve.reference_date();
        let tau = self.accrual(valuation, config)?;
        let df = curve.discount(self.maturity_date(valuation, config)?)?;
        Ok((T::one() / df - T::one()) / tau)
    }

    /// Difference between the curve-implied rate and the quote.
    pub fn residual<C>(&self, curve: &C, config: &BootstrapConfig) -> Result<T, BootstrapError>
    where
        C: YieldCurve<T> + ?Sized,
    {
        Ok(self.implied_rate(curve, config)? - self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::DayCountConvention;

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_maturity_rolls_modified_following() {
        let config = BootstrapConfig::default();
        // 2027-01-02 is a Saturday
        let quote = DepositQuote::new(2, 0.05);
        assert_eq!(
            quote.maturity_date(valuation(), &config).unwrap(),
            Date::from_ymd(2027, 1, 4).unwrap()
        );
    }

    #[test]
    fn test_accrual_is_act_360() {
        let config = BootstrapConfig::default();
        let quote = DepositQuote::new(1, 0.05_f64);
        let tau = quote.accrual(valuation(), &config).unwrap();
        assert_relative_eq!(tau, 365.0 / 360.0, epsilon = 1e-15);
        assert_relative_eq!(
            quote.discount_factor(tau),
            1.0 / (1.0 + 0.05 * 365.0 / 360.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_accrual_follows_configured_day_count() {
        let config = BootstrapConfig::default().with_day_count(DayCountConvention::Actual365Fixed);
        let tau = DepositQuote::new(1, 0.05_f64).accrual(valuation(), &config).unwrap();
        assert_relative_eq!(tau, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_from_percentages_numbers_years() {
        let quotes = DepositQuote::<f64>::from_percentages(&[5.0, 5.1, 5.2]);
        let years: Vec<u32> = quotes.iter().map(|q| q.years()).collect();
        assert_eq!(years, vec![1, 2, 3]);
        assert_relative_eq!(quotes[2].rate(), 0.052, epsilon = 1e-15);
        assert!(DepositQuote::<f64>::from_percentages(&[]).is_empty());
    }
}
