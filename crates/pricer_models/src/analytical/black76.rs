//! Black (1976) model on a lognormal forward.
//!
//! Used for European swaptions, where the forward is the par swap rate and
//! the discounting numeraire is the annuity of the underlying fixed leg:
//!
//! **Payer**: A·[F·N(d₁) − K·N(d₂)]
//! **Receiver**: A·[K·N(−d₂) − F·N(−d₁)]
//!
//! with d₁ = (ln(F/K) + σ²T/2) / (σ√T) and d₂ = d₁ − σ√T.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Total standard deviation σ√T below which the payoff is treated as
/// deterministic.
pub const MIN_TOTAL_VOLATILITY: f64 = 1e-12;

/// Black model for options on a lognormal forward.
///
/// Prices are undiscounted; multiply by the numeraire (discount factor or
/// annuity) to obtain a present value.
///
/// # Examples
/// ```
/// use pricer_models::analytical::Black76;
///
/// let black = Black76::new(0.05_f64, 0.2).unwrap();
/// let call = black.price_call(0.05, 1.0);
/// let put = black.price_put(0.05, 1.0);
/// // At the money: call = put
/// assert!((call - put).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Black76<T: Float> {
    forward: T,
    volatility: T,
}

impl<T: Float> Black76<T> {
    /// Creates a Black model on `forward` with lognormal `volatility`.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidForward` if the forward is not positive
    /// - `AnalyticalError::InvalidVolatility` if volatility is negative or
    ///   not finite
    pub fn new(forward: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(forward > T::zero()) || !forward.is_finite() {
            return Err(AnalyticalError::InvalidForward {
                forward: forward.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility >= T::zero()) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            forward,
            volatility,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> T {
        self.forward
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// σ√T.
    #[inline]
    pub fn total_volatility(&self, expiry: T) -> T {
        self.volatility * expiry.max(T::zero()).sqrt()
    }

    fn is_degenerate(&self, expiry: T) -> bool {
        self.total_volatility(expiry) < T::from(MIN_TOTAL_VOLATILITY).unwrap_or_else(T::zero)
    }

    /// (d₁, d₂) for a strike and expiry with non-degenerate σ√T.
    pub fn d1_d2(&self, strike: T, expiry: T) -> (T, T) {
        let sd = self.total_volatility(expiry);
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let d1 = ((self.forward / strike).ln() + half * sd * sd) / sd;
        (d1, d1 - sd)
    }

    /// Undiscounted call on the forward: F·N(d₁) − K·N(d₂).
    ///
    /// Falls back to max(F − K, 0) when σ√T is negligible.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return (self.forward - strike).max(T::zero());
        }
        let (d1, d2) = self.d1_d2(strike, expiry);
        self.forward * norm_cdf(d1) - strike * norm_cdf(d2)
    }

    /// Undiscounted put on the forward: K·N(−d₂) − F·N(−d₁).
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return (strike - self.forward).max(T::zero());
        }
        let (d1, d2) = self.d1_d2(strike, expiry);
        strike * norm_cdf(-d2) - self.forward * norm_cdf(-d1)
    }

    /// Undiscounted vega: F·φ(d₁)·√T.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        let (d1, _) = self.d1_d2(strike, expiry);
        self.forward * norm_pdf(d1) * expiry.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(matches!(
            Black76::new(0.0_f64, 0.2),
            Err(AnalyticalError::InvalidForward { .. })
        ));
        assert!(matches!(
            Black76::new(-0.01_f64, 0.2),
            Err(AnalyticalError::InvalidForward { .. })
        ));
        assert!(matches!(
            Black76::new(0.05_f64, -0.1),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            Black76::new(0.05_f64, f64::NAN),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(Black76::new(0.05_f64, 0.0).is_ok());
    }

    #[test]
    fn test_reference_price() {
        // F = 0.05, K = 0.05, σ = 0.2, T = 1: 2F·N(σ/2) − F
        let black = Black76::new(0.05_f64, 0.2).unwrap();
        let expected = 0.05 * (2.0 * norm_cdf(0.1) - 1.0);
        assert_relative_eq!(black.price_call(0.05, 1.0), expected, epsilon = 1e-15);
        assert_relative_eq!(expected, 0.003_982_783_727_703, epsilon = 1e-12);
    }

    #[test]
    fn test_put_call_parity() {
        let black = Black76::new(0.043_f64, 0.35).unwrap();
        for strike in [0.01, 0.03, 0.043, 0.06, 0.1] {
            let parity = black.price_call(strike, 2.5) - black.price_put(strike, 2.5);
            assert_relative_eq!(parity, 0.043 - strike, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let black = Black76::new(0.05_f64, 0.0).unwrap();
        assert_eq!(black.price_call(0.03, 1.0), 0.05 - 0.03);
        assert_eq!(black.price_call(0.07, 1.0), 0.0);
        assert_eq!(black.price_put(0.07, 1.0), 0.07 - 0.05);
        assert_eq!(black.vega(0.05, 1.0), 0.0);
    }

    #[test]
    fn test_small_volatility_converges_to_intrinsic() {
        let black = Black76::new(0.05_f64, 1e-6).unwrap();
        assert_relative_eq!(black.price_call(0.03, 1.0), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_vega_positive() {
        let black = Black76::new(0.05_f64, 0.2).unwrap();
        assert!(black.vega(0.05, 1.0) > 0.0);
    }

    proptest! {
        #[test]
        fn prop_call_decreasing_in_strike(
            forward in 0.005f64..0.1,
            vol in 0.01f64..1.0,
            expiry in 0.1f64..10.0,
            k in 0.005f64..0.1,
            dk in 1e-4f64..0.05,
        ) {
            let black = Black76::new(forward, vol).unwrap();
            let c1 = black.price_call(k, expiry);
            let c2 = black.price_call(k + dk, expiry);
            prop_assert!(c1 >= 0.0);
            prop_assert!(c2 <= c1);
        }
    }
}
