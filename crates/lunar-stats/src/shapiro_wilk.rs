//! Shapiro–Wilk test of normality.
//!
//! Coefficients and the p-value use Royston's approximations (Applied
//! Statistics algorithm AS R94), valid for samples of 3 to 5000 values.

#![allow(clippy::unreadable_literal)]

use serde::Serialize;

use crate::{
    error::{self, StatsError, StatsResult},
    special,
};

const MIN_SAMPLE: usize = 3;
const MAX_SAMPLE: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapiroWilkResult {
    /// The W statistic, in `(0, 1]`; values near 1 are consistent with normality.
    pub statistic: f64,
    pub p_value: f64,
    pub n: usize,
}

/// Tests whether `values` are drawn from a normal distribution.
///
/// # Errors
///
/// * [`StatsError::InsufficientSample`] below 3 values
/// * [`StatsError::SampleTooLarge`] above 5000 values
/// * [`StatsError::NonFiniteValue`] if a value is NaN or infinite
/// * [`StatsError::ZeroVariance`] if all values are identical
///
/// # Examples
///
/// ```
/// use lunar_stats::shapiro_wilk;
///
/// let values = (1..=20).map(f64::from).collect::<Vec<_>>();
/// let result = shapiro_wilk::test(&values).unwrap();
/// assert!((result.statistic - 0.960_38).abs() < 1e-4);
/// assert!(result.p_value > 0.5);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn test(values: &[f64]) -> StatsResult<ShapiroWilkResult> {
    let n = values.len();
    if n < MIN_SAMPLE {
        return Err(StatsError::InsufficientSample {
            required: MIN_SAMPLE,
            actual: n,
        });
    }
    if n > MAX_SAMPLE {
        return Err(StatsError::SampleTooLarge {
            limit: MAX_SAMPLE,
            actual: n,
        });
    }
    error::ensure_finite(values)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let range = sorted[n - 1] - sorted[0];
    if range <= 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    let coefficients = coefficients(n);
    let an = n as f64;

    // Correlation between the scaled sample and the coefficients
    let mean_a = coefficients.iter().sum::<f64>() / an;
    let mean_x = sorted.iter().map(|x| x / range).sum::<f64>() / an;
    let (mut ssa, mut ssx, mut sax) = (0.0, 0.0, 0.0);
    for (a, x) in coefficients.iter().zip(&sorted) {
        let da = a - mean_a;
        let dx = x / range - mean_x;
        ssa += da * da;
        ssx += dx * dx;
        sax += da * dx;
    }
    let root = (ssa * ssx).sqrt();
    let one_minus_w = (root - sax) * (root + sax) / (ssa * ssx);
    let statistic = 1.0 - one_minus_w;

    let p_value = p_value(statistic, one_minus_w, n);
    Ok(ShapiroWilkResult {
        statistic,
        p_value,
        n,
    })
}

/// Antisymmetric coefficient vector over the whole sorted sample.
#[expect(clippy::cast_precision_loss)]
fn coefficients(n: usize) -> Vec<f64> {
    const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
    const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];

    let half = n / 2;
    let an = n as f64;
    let mut upper = vec![0.0; half];
    if n == 3 {
        upper[0] = std::f64::consts::FRAC_1_SQRT_2;
    } else {
        let an25 = an + 0.25;
        let m = (1..=half)
            .map(|i| special::norm_ppf((i as f64 - 0.375) / an25))
            .collect::<Vec<_>>();
        let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
        let ssumm2 = summ2.sqrt();
        let rsn = 1.0 / an.sqrt();

        let a1 = poly(&C1, rsn) - m[0] / ssumm2;
        let (first_free, fac) = if n > 5 {
            let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
            upper[1] = a2;
            let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
                / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
                .sqrt();
            (2, fac)
        } else {
            let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
            (1, fac)
        };
        upper[0] = a1;
        for (slot, mi) in upper.iter_mut().zip(&m).skip(first_free) {
            *slot = -mi / fac;
        }
    }

    (0..n)
        .map(|i| {
            let j = n - 1 - i;
            match i.cmp(&j) {
                std::cmp::Ordering::Less => -upper[i],
                std::cmp::Ordering::Greater => upper[j],
                std::cmp::Ordering::Equal => 0.0,
            }
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn p_value(w: f64, one_minus_w: f64, n: usize) -> f64 {
    const PI6: f64 = 1.90985931710274;
    const STQR: f64 = 1.04719755119660;
    const G: [f64; 2] = [-2.273, 0.459];
    const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
    const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
    const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
    const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];

    if n == 3 {
        // Exact distribution
        return (PI6 * (w.sqrt().min(1.0).asin() - STQR)).clamp(0.0, 1.0);
    }

    let an = n as f64;
    let mut y = one_minus_w.ln();
    let (m, s) = if an <= 11.0 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 0.0;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };
    special::norm_sf((y - m) / s)
}

/// Evaluates `c[0] + c[1] x + c[2] x² + ...`.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{anova::TwoWayAnova, fixtures};

    #[test]
    fn test_anova_residuals() {
        let fit = TwoWayAnova::fit(&fixtures::layout()).unwrap();
        let result = test(&fit.residuals).unwrap();
        assert_eq!(result.n, 36);
        assert_abs_diff_eq!(result.statistic, 0.946_944, epsilon = 1e-5);
        assert_abs_diff_eq!(result.p_value, 0.083_797, epsilon = 1e-4);
    }

    #[test]
    fn test_small_sample() {
        let values = [-1.2, -0.5, 0.0, 0.3, 0.7, 1.0, 1.5, 2.0, -0.8, 0.2];
        let result = test(&values).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.983_44, epsilon = 1e-4);
        assert_abs_diff_eq!(result.p_value, 0.9809, epsilon = 1e-3);
    }

    #[test]
    fn test_three_equally_spaced_values() {
        let result = test(&[1.0, 2.0, 3.0]).unwrap();
        assert_abs_diff_eq!(result.statistic, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = test(&[3.1, 0.2, 5.5, 2.4, 1.9, 4.0]).unwrap();
        let b = test(&[5.5, 4.0, 3.1, 2.4, 1.9, 0.2]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_degenerate_samples() {
        assert_eq!(
            test(&[1.0, 2.0]),
            Err(StatsError::InsufficientSample {
                required: 3,
                actual: 2
            })
        );
        assert_eq!(test(&[4.0; 5]), Err(StatsError::ZeroVariance));
        assert_eq!(test(&[1.0, f64::NAN, 2.0]), Err(StatsError::NonFiniteValue));
        assert!(matches!(
            test(&vec![0.0; 5001]),
            Err(StatsError::SampleTooLarge { .. })
        ));
    }

    #[test]
    fn test_poly_evaluates_in_ascending_powers() {
        assert_abs_diff_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 17.0, epsilon = 1e-12);
    }
}
