//! Portfolio error types.
//!
//! Every failure below the orchestrator is folded into [`PortfolioError`],
//! which also exposes a stable error-kind name for presentation layers.

use pricer_models::instruments::rates::ValuationError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::rates::LatticeError;
use pricer_models::schedules::ScheduleError;
use pricer_optimiser::bootstrapping::BootstrapError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while pricing the portfolio.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Rejected user input (quotes, valuation date).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Curve bootstrapping failed.
    #[error("Curve calibration failed: {0}")]
    Curve(#[from] BootstrapError),

    /// A payment schedule could not be generated.
    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    /// Lattice construction or calibration failed.
    #[error("Lattice calibration failed: {0}")]
    Lattice(#[from] LatticeError),

    /// Instrument terms were rejected.
    #[error("Invalid instrument: {0}")]
    Instrument(InstrumentError),

    /// Curve lookup or closed-form pricing failed.
    #[error("Valuation failed: {0}")]
    Valuation(ValuationError),

    /// Portfolio configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PortfolioError {
    /// Stable error-kind name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_portfolio::PortfolioError;
    ///
    /// let err = PortfolioError::InvalidInput("rate0 is not a number".into());
    /// assert_eq!(err.kind(), "InvalidInputError");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            PortfolioError::InvalidInput(_) => "InvalidInputError",
            PortfolioError::Curve(_) => "CurveCalibrationError",
            PortfolioError::Schedule(_) => "InvalidScheduleError",
            PortfolioError::Lattice(_) => "LatticeCalibrationError",
            PortfolioError::Instrument(_) => "InvalidInstrumentError",
            PortfolioError::Valuation(_) => "PricingError",
            PortfolioError::Config(_) => "ConfigError",
        }
    }

    /// Whether the caller can fix the error by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PortfolioError::InvalidInput(_) | PortfolioError::Curve(_)
        )
    }
}

impl From<InstrumentError> for PortfolioError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::Schedule(e) => PortfolioError::Schedule(e),
            other => PortfolioError::Instrument(other),
        }
    }
}

impl From<ValuationError> for PortfolioError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::Lattice(e) => PortfolioError::Lattice(e),
            ValuationError::Instrument(e) => e.into(),
            other => PortfolioError::Valuation(other),
        }
    }
}
