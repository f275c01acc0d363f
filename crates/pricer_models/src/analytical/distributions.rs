//! Standard normal distribution functions.
//!
//! Generic over `T: Float`. The CDF uses Hart's double-precision rational
//! approximation (as popularised by West, 2005), accurate to about 1e-14.

use num_traits::Float;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2π)
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Beyond this |x| the tail mass underflows.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational and continued-fraction branches.
const BRANCH_POINT: f64 = 7.071_067_811_865_47;

const NUM: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

const DEN: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

#[inline]
fn c<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

#[inline]
fn horner<T: Float>(coeffs: &[f64], x: T) -> T {
    coeffs
        .iter()
        .fold(T::zero(), |acc, &k| acc * x + c::<T>(k))
}

/// Standard normal cumulative distribution function Φ(x).
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-14);
/// assert!((norm_cdf(1.0_f64) - 0.841_344_746_068_542_9).abs() < 1e-12);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let abs_x = x.abs();

    let tail = if abs_x > c(TAIL_CUTOFF) {
        T::zero()
    } else {
        let gauss = (-abs_x * abs_x * c(0.5)).exp();
        if abs_x < c(BRANCH_POINT) {
            gauss * horner(&NUM, abs_x) / horner(&DEN, abs_x)
        } else {
            let mut frac = abs_x + c(0.65);
            for k in [4.0, 3.0, 2.0, 1.0] {
                frac = abs_x + c::<T>(k) / frac;
            }
            gauss / frac / c(SQRT_2PI)
        }
    };

    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density φ(x) = exp(−x²/2) / √(2π).
///
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    c::<T>(FRAC_1_SQRT_2PI) * (-x * x * c(0.5)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_542_9, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158_655_253_931_457_07, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.977_249_868_051_820_8, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-3.0_f64), 0.001_349_898_031_630_094_6, epsilon = 1e-13);
    }

    #[test]
    fn test_norm_cdf_far_tails() {
        assert_eq!(norm_cdf(-40.0_f64), 0.0);
        assert_eq!(norm_cdf(40.0_f64), 1.0);
        let deep = norm_cdf(-8.0_f64);
        assert!(deep > 0.0 && deep < 1e-14);
    }

    #[test]
    fn test_norm_pdf_values() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.241_970_724_519_143_37, epsilon = 1e-14);
        assert_relative_eq!(norm_pdf(-1.0_f64), norm_pdf(1.0_f64), epsilon = 1e-16);
    }

    proptest! {
        #[test]
        fn prop_cdf_symmetric(x in -10.0f64..10.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-13);
        }

        #[test]
        fn prop_cdf_monotone(x in -8.0f64..8.0, dx in 1e-3f64..1.0) {
            prop_assert!(norm_cdf(x + dx) >= norm_cdf(x));
        }
    }
}
