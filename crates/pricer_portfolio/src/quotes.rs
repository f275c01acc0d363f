//! Curve quote parsing and validation.
//!
//! Quotes arrive as annual rates in percent, one per consecutive year
//! (`quotes[0]` is the 1Y rate).

use crate::config::PortfolioConfig;
use crate::error::PortfolioError;

/// Default curve quotes in percent (1Y to 5Y).
pub const BASELINE_QUOTES: [f64; 5] = [5.0, 5.1, 5.2, 5.3, 5.4];

/// Checks count and range of percentage quotes.
///
/// # Errors
///
/// `InvalidInput` if there are no quotes, more than `max_quotes`, or any
/// quote is non-finite, at or below -100, or above `max_rate_pct`.
pub fn validate_quotes(quotes: &[f64], config: &PortfolioConfig) -> Result<(), PortfolioError> {
    if quotes.is_empty() {
        return Err(PortfolioError::InvalidInput(
            "at least one rate quote is required".to_string(),
        ));
    }
    if quotes.len() > config.max_quotes {
        return Err(PortfolioError::InvalidInput(format!(
            "{} rate quotes given, at most {} accepted",
            quotes.len(),
            config.max_quotes
        )));
    }
    for (i, q) in quotes.iter().enumerate() {
        if !q.is_finite() {
            return Err(PortfolioError::InvalidInput(format!(
                "rate{} is not a finite number",
                i
            )));
        }
        if *q <= -100.0 || *q > config.max_rate_pct {
            return Err(PortfolioError::InvalidInput(format!(
                "rate{} = {} is outside (-100, {}]",
                i, q, config.max_rate_pct
            )));
        }
    }
    Ok(())
}

/// Parses raw text fields into percentage quotes and validates them.
///
/// # Examples
///
/// ```
/// use pricer_portfolio::{parse_quotes, PortfolioConfig};
///
/// let config = PortfolioConfig::default();
/// let quotes = parse_quotes(&["5.0", " 5.25 "], &config).unwrap();
/// assert_eq!(quotes, vec![5.0, 5.25]);
///
/// let err = parse_quotes(&["5.0", "abc"], &config).unwrap_err();
/// assert_eq!(err.kind(), "InvalidInputError");
/// ```
pub fn parse_quotes<S: AsRef<str>>(
    raw: &[S],
    config: &PortfolioConfig,
) -> Result<Vec<f64>, PortfolioError> {
    let quotes = raw
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let s = s.as_ref().trim();
            s.parse::<f64>().map_err(|_| {
                PortfolioError::InvalidInput(format!("rate{} = {:?} is not a number", i, s))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_quotes(&quotes, config)?;
    Ok(quotes)
}
