//! Portfolio configuration.
//!
//! Loaded from defaults, an optional TOML file and `PRICER_*` environment
//! variables, in increasing priority.

use std::path::Path;

use pricer_models::models::rates::{HullWhiteParams, LatticeConfig};
use pricer_optimiser::bootstrapping::BootstrapConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// An environment override could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

/// Settings of the portfolio pricer.
///
/// Rates are percentages (`3.0` is 3%); volatilities are decimals.
///
/// # Examples
///
/// ```
/// use pricer_portfolio::PortfolioConfig;
///
/// let config = PortfolioConfig::from_toml_str("max_quotes = 10\n").unwrap();
/// assert_eq!(config.max_quotes, 10);
/// assert_eq!(config.swap_tenor_years, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Maximum number of curve quotes accepted.
    pub max_quotes: usize,
    /// Largest accepted quote in percent.
    pub max_rate_pct: f64,
    /// Value instruments on the rayon pool.
    pub parallel: bool,
    /// Notional of every instrument.
    pub notional: f64,
    /// Fixed rate of every swap, in percent.
    pub fixed_rate_pct: f64,
    /// Spot swap tenor in years; also the maturity of the forward swap.
    pub swap_tenor_years: u32,
    /// Forward start (and European exercise) of the swaption underlying, in years.
    pub forward_start_years: u32,
    /// Black volatility of the European swaption.
    pub european_volatility: f64,
    /// Hull-White parameters for the Bermudan swaption.
    pub hull_white: HullWhiteParams,
    /// Lattice settings for the Bermudan swaption.
    pub lattice: LatticeConfig,
    /// Curve bootstrapping conventions.
    pub curve: BootstrapConfig,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            max_quotes: 30,
            max_rate_pct: 100.0,
            parallel: true,
            notional: 1_000_000.0,
            fixed_rate_pct: 3.0,
            swap_tenor_years: 5,
            forward_start_years: 1,
            european_volatility: 0.01,
            hull_white: HullWhiteParams::default(),
            lattice: LatticeConfig::default(),
            curve: BootstrapConfig::default(),
        }
    }
}

impl PortfolioConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PortfolioConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Apply `PRICER_*` environment overrides.
    ///
    /// Recognised variables: `PRICER_MAX_QUOTES`, `PRICER_PARALLEL`,
    /// `PRICER_LATTICE_STEPS`, `PRICER_HW_MEAN_REVERSION`,
    /// `PRICER_HW_VOLATILITY`, `PRICER_EUROPEAN_VOLATILITY`.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", key, value)))
        }

        if let Some(v) = var("PRICER_MAX_QUOTES") {
            self.max_quotes = parse("PRICER_MAX_QUOTES", &v)?;
        }
        if let Some(v) = var("PRICER_PARALLEL") {
            self.parallel = parse("PRICER_PARALLEL", &v)?;
        }
        if let Some(v) = var("PRICER_LATTICE_STEPS") {
            self.lattice.steps = parse("PRICER_LATTICE_STEPS", &v)?;
        }
        if let Some(v) = var("PRICER_HW_MEAN_REVERSION") {
            self.hull_white.mean_reversion = parse("PRICER_HW_MEAN_REVERSION", &v)?;
        }
        if let Some(v) = var("PRICER_HW_VOLATILITY") {
            self.hull_white.volatility = parse("PRICER_HW_VOLATILITY", &v)?;
        }
        if let Some(v) = var("PRICER_EUROPEAN_VOLATILITY") {
            self.european_volatility = parse("PRICER_EUROPEAN_VOLATILITY", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quotes == 0 {
            return Err(invalid("max_quotes", "must be at least 1"));
        }
        if !self.max_rate_pct.is_finite() || self.max_rate_pct <= -100.0 {
            return Err(invalid("max_rate_pct", "must be finite and above -100"));
        }
        if !self.notional.is_finite() || self.notional <= 0.0 {
            return Err(invalid("notional", "must be positive"));
        }
        if !self.fixed_rate_pct.is_finite() {
            return Err(invalid("fixed_rate_pct", "must be finite"));
        }
        if self.forward_start_years >= self.swap_tenor_years {
            return Err(invalid(
                "forward_start_years",
                format!("must be below swap_tenor_years ({})", self.swap_tenor_years),
            ));
        }
        if !self.european_volatility.is_finite() || self.european_volatility < 0.0 {
            return Err(invalid("european_volatility", "must be non-negative"));
        }
        self.hull_white
            .validate()
            .map_err(|e| invalid("hull_white", e.to_string()))?;
        self.lattice
            .validate()
            .map_err(|e| invalid("lattice", e.to_string()))?;
        Ok(())
    }
}
