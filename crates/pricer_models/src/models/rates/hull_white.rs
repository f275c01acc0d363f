//! Hull-White one-factor short-rate model parameters.
//!
//! The short rate is split as r(t) = x(t) + α(t) with
//! ```text
//! dx(t) = -a·x(t)·dt + σ·dW(t),   x(0) = 0
//! ```
//! and α(t) a deterministic shift fitted so the model reprices the initial
//! discount curve. `x` is Ornstein-Uhlenbeck, so its transition over a step
//! is Gaussian with closed-form mean and variance.

use super::error::LatticeError;

/// Hull-White parameters: mean reversion `a` and volatility `σ`.
///
/// # Examples
///
/// ```
/// use pricer_models::models::rates::HullWhiteParams;
///
/// let params = HullWhiteParams::new(0.1, 0.01).unwrap();
/// assert!(params.conditional_variance(1.0) < 0.01 * 0.01);
/// assert!(HullWhiteParams::new(0.0, 0.01).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HullWhiteParams {
    /// Mean reversion speed a (> 0).
    pub mean_reversion: f64,
    /// Short-rate volatility σ (> 0, absolute).
    pub volatility: f64,
}

impl Default for HullWhiteParams {
    fn default() -> Self {
        Self {
            mean_reversion: 0.1,
            volatility: 0.01,
        }
    }
}

impl HullWhiteParams {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// `InvalidMeanReversion` or `InvalidVolatility` when a parameter is not
    /// positive and finite.
    pub fn new(mean_reversion: f64, volatility: f64) -> Result<Self, LatticeError> {
        let params = Self {
            mean_reversion,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that both parameters are positive and finite.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if !(self.mean_reversion > 0.0) || !self.mean_reversion.is_finite() {
            return Err(LatticeError::InvalidMeanReversion(self.mean_reversion));
        }
        if !(self.volatility > 0.0) || !self.volatility.is_finite() {
            return Err(LatticeError::InvalidVolatility(self.volatility));
        }
        Ok(())
    }

    /// Decay factor e^{−a·dt} of the conditional mean over a step.
    #[inline]
    pub fn decay(&self, dt: f64) -> f64 {
        (-self.mean_reversion * dt).exp()
    }

    /// Conditional variance of x over a step of length `dt`:
    /// σ²/(2a)·(1 − e^{−2a·dt}).
    #[inline]
    pub fn conditional_variance(&self, dt: f64) -> f64 {
        let a = self.mean_reversion;
        self.volatility * self.volatility / (2.0 * a) * (-(-2.0 * a * dt).exp_m1())
    }

    /// B(t, T) = (1 − e^{−a(T−t)})/a, the bond sensitivity to x.
    #[inline]
    pub fn bond_factor(&self, tau: f64) -> f64 {
        -(-self.mean_reversion * tau).exp_m1() / self.mean_reversion
    }
}
