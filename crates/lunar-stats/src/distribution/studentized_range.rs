//! Distribution of the studentized range `q = (max - min) / s` of `k` normal
//! means, with `df` degrees of freedom for the variance estimate `s²`.
//!
//! The CDF integrates the probability of the range of `k` standard normal
//! variables (itself an integral, evaluated with 12-point Gauss–Legendre
//! quadrature) against the chi density of `s`, using 16-point Gauss–Legendre
//! quadrature over successive intervals (Copenhaver & Holland, 1988).

#![allow(clippy::unreadable_literal, clippy::excessive_precision)]

use std::f64::consts::{LN_2, PI};

use super::ContinuousDistribution;
use crate::{
    error::{StatsError, StatsResult},
    special,
};

/// Studentized range distribution used by Tukey's HSD procedure.
///
/// # Examples
///
/// ```
/// use lunar_stats::distribution::{ContinuousDistribution, StudentizedRange};
///
/// // Critical value for 4 means and 24 residual degrees of freedom
/// let q = StudentizedRange::new(4, 24.0).unwrap();
/// assert!((q.quantile(0.95) - 3.901).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentizedRange {
    groups: usize,
    df: f64,
}

impl StudentizedRange {
    /// Creates the distribution for `groups` means (at least 2) and `df`
    /// degrees of freedom (at least 2).
    pub fn new(groups: usize, df: f64) -> StatsResult<Self> {
        if groups < 2 {
            return Err(StatsError::InsufficientSample {
                required: 2,
                actual: groups,
            });
        }
        if df.is_nan() || df < 2.0 {
            return Err(StatsError::InvalidParameter {
                name: "df",
                value: df,
            });
        }
        Ok(Self { groups, df })
    }

    #[must_use]
    pub fn groups(&self) -> usize {
        self.groups
    }

    #[must_use]
    pub fn df(&self) -> f64 {
        self.df
    }
}

impl ContinuousDistribution for StudentizedRange {
    #[expect(clippy::cast_precision_loss)]
    fn cdf(&self, x: f64) -> f64 {
        ptukey(x, self.groups as f64, self.df)
    }

    #[expect(clippy::cast_precision_loss)]
    fn quantile(&self, p: f64) -> f64 {
        if !(p > 0.0 && p < 1.0) {
            return f64::NAN;
        }
        qtukey(p, self.groups as f64, self.df)
    }
}

const WPROB_LEGENDRE_X: [f64; 6] = [
    0.981560634246719250690549090149,
    0.904117256370474856678465866119,
    0.769902674194304687036893833213,
    0.587317954286617447296702418941,
    0.367831498998180193752691536644,
    0.125233408511468915472441369464,
];
const WPROB_LEGENDRE_W: [f64; 6] = [
    0.047175336386511827194615961485,
    0.106939325995318430960254718194,
    0.160078328543346226334652529543,
    0.203167426723065921749064455810,
    0.233492536538354808760849898925,
    0.249147045813402785000562436043,
];

const PTUKEY_LEGENDRE_X: [f64; 8] = [
    0.989400934991649932596154173450,
    0.944575023073232576077988415535,
    0.865631202387831743880467897712,
    0.755404408355003033895101194847,
    0.617876244402643748446671764049,
    0.458016777657227386342419442984,
    0.281603550779258913230460501460,
    0.950125098376374401853193354250e-1,
];
const PTUKEY_LEGENDRE_W: [f64; 8] = [
    0.271524594117540948517805724560e-1,
    0.622535239386478928628438369944e-1,
    0.951585116824927848099251076022e-1,
    0.124628971255533872052476282192,
    0.149595988816576732081501730547,
    0.169156519395002538189312079030,
    0.182603415044923588866763667969,
    0.189450610455068496285396723208,
];

/// Probability that the range of `groups` standard normal variables is
/// below `w` (infinite degrees of freedom).
fn range_probability(w: f64, groups: f64) -> f64 {
    const UPPER: f64 = 8.0;
    const EXP_FLOOR: f64 = -30.0;
    const MAX_SQUARE: f64 = 60.0;

    let half_w = w * 0.5;
    if half_w >= UPPER {
        return 1.0;
    }

    // First term: (2Φ(w/2) - 1)^k
    let first = 2.0 * special::norm_cdf(half_w) - 1.0;
    let mut prob = if first >= 1.0 { 1.0 } else { first.powf(groups) };

    let intervals: u32 = if w > 3.0 { 2 } else { 3 };
    let step = (UPPER - half_w) / f64::from(intervals);
    let k_minus_1 = groups - 1.0;
    let threshold = (EXP_FLOOR / k_minus_1).exp();

    let mut lower = half_w;
    let mut upper = lower + step;
    let mut integral = 0.0;
    for _ in 0..intervals {
        let center = 0.5 * (upper + lower);
        let half_width = 0.5 * (upper - lower);
        let mut sum = 0.0;
        for jj in 0..12 {
            let (node, weight) = if jj < 6 {
                (-WPROB_LEGENDRE_X[jj], WPROB_LEGENDRE_W[jj])
            } else {
                (WPROB_LEGENDRE_X[11 - jj], WPROB_LEGENDRE_W[11 - jj])
            };
            let ac = center + half_width * node;
            let square = ac * ac;
            if square > MAX_SQUARE {
                break;
            }
            let inner = special::norm_cdf(ac) - special::norm_cdf(ac - w);
            if inner >= threshold {
                sum += weight * (-0.5 * square).exp() * inner.powf(k_minus_1);
            }
        }
        integral += sum * (2.0 * half_width * groups) / (2.0 * PI).sqrt();
        lower = upper;
        upper += step;
    }

    prob += integral;
    if prob <= EXP_FLOOR.exp() {
        return 0.0;
    }
    prob.min(1.0)
}

fn ptukey(q: f64, groups: f64, df: f64) -> f64 {
    const EXP_FLOOR: f64 = -30.0;
    const CONVERGED: f64 = 1e-14;
    const LARGE_DF: f64 = 25_000.0;

    if q.is_nan() {
        return f64::NAN;
    }
    if q <= 0.0 {
        return 0.0;
    }
    if q.is_infinite() {
        return 1.0;
    }
    if df > LARGE_DF {
        return range_probability(q, groups);
    }

    let half_df = df * 0.5;
    let interval: f64 = if df <= 100.0 {
        1.0
    } else if df <= 800.0 {
        0.5
    } else if df <= 5000.0 {
        0.25
    } else {
        0.125
    };
    let log_norm =
        half_df * df.ln() - df * LN_2 - special::ln_gamma(half_df) + interval.ln();
    let half_df_minus_1 = half_df - 1.0;
    let quarter_df = df * 0.25;

    let mut total = 0.0;
    for i in 1..=50_u32 {
        let mid = f64::from(2 * i - 1) * interval;
        let mut partial = 0.0;
        for jj in 0..16 {
            let (offset, weight) = if jj < 8 {
                (-PTUKEY_LEGENDRE_X[jj] * interval, PTUKEY_LEGENDRE_W[jj])
            } else {
                (PTUKEY_LEGENDRE_X[jj - 8] * interval, PTUKEY_LEGENDRE_W[jj - 8])
            };
            let u = mid + offset;
            let log_density = log_norm + half_df_minus_1 * u.ln() - u * quarter_df;
            if log_density >= EXP_FLOOR {
                let scaled = q * (u * 0.5).sqrt();
                partial += range_probability(scaled, groups) * weight * log_density.exp();
            }
        }
        if f64::from(i) * interval >= 1.0 && partial <= CONVERGED {
            break;
        }
        total += partial;
    }
    total.min(1.0)
}

/// Initial approximation of the quantile (Odeh & Evans style rational fit).
fn qtukey_initial(p: f64, groups: f64, df: f64) -> f64 {
    const P: [f64; 5] = [
        0.322232421088,
        -1.0,
        -0.342242088547,
        -0.204231210125,
        -0.453642210148e-04,
    ];
    const Q: [f64; 5] = [
        0.993484626060e-01,
        0.588581570495,
        0.531103462366,
        0.103537752850,
        0.38560700634e-02,
    ];
    const DF_MAX: f64 = 120.0;

    let ps = 0.5 - 0.5 * p;
    let yi = (1.0 / (ps * ps)).ln().sqrt();
    let mut t = yi
        + ((((yi * P[4] + P[3]) * yi + P[2]) * yi + P[1]) * yi + P[0])
            / ((((yi * Q[4] + Q[3]) * yi + Q[2]) * yi + Q[1]) * yi + Q[0]);
    if df < DF_MAX {
        t += (t * t * t + t) / df / 4.0;
    }
    let mut q = 0.8832 - 0.2368 * t;
    if df < DF_MAX {
        q += -1.214 / df + 1.208 * t / df;
    }
    t * (q * (groups - 1.0).ln() + 1.4142)
}

/// Secant iteration on `ptukey(x) - p`.
fn qtukey(p: f64, groups: f64, df: f64) -> f64 {
    const TOLERANCE: f64 = 1e-4;
    const MAX_ITER: usize = 50;

    let mut x0 = qtukey_initial(p, groups, df);
    let mut f0 = ptukey(x0, groups, df) - p;
    let mut x1 = if f0 > 0.0 {
        f64::max(0.0, x0 - 1.0)
    } else {
        x0 + 1.0
    };
    let mut f1 = ptukey(x1, groups, df) - p;

    let mut next = x1;
    for _ in 1..MAX_ITER {
        next = x1 - f1 * (x1 - x0) / (f1 - f0);
        f0 = f1;
        x0 = x1;
        if next < 0.0 {
            next = 0.0;
        }
        f1 = ptukey(next, groups, df) - p;
        x1 = next;
        if (x1 - x0).abs() < TOLERANCE {
            return next;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_quantiles_match_reference_tables() {
        // qtukey(0.95, k, 24)
        let cases = [(3, 3.531_697), (4, 3.901_262), (12, 5.099_130)];
        for (groups, expected) in cases {
            let dist = StudentizedRange::new(groups, 24.0).unwrap();
            assert_abs_diff_eq!(dist.quantile(0.95), expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_cdf_reference_values() {
        // ptukey(3.5, 4, 24) and ptukey(3, 3, 10)
        let d = StudentizedRange::new(4, 24.0).unwrap();
        assert_abs_diff_eq!(d.cdf(3.5), 0.910_171_471_8, epsilon = 1e-7);
        let d = StudentizedRange::new(3, 10.0).unwrap();
        assert_abs_diff_eq!(d.cdf(3.0), 0.865_016_584_8, epsilon = 1e-7);
    }

    #[test]
    fn test_cdf_is_monotone_and_bounded() {
        let d = StudentizedRange::new(5, 30.0).unwrap();
        let mut prev = 0.0;
        for i in 0..40 {
            let x = f64::from(i) * 0.25;
            let p = d.cdf(x);
            assert!((0.0..=1.0).contains(&p));
            assert!(p + 1e-12 >= prev, "cdf decreased at {x}");
            prev = p;
        }
        assert_eq!(d.cdf(0.0), 0.0);
        assert_eq!(d.cdf(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_cdf_is_continuous_across_integration_steps() {
        for df in [100.0, 800.0, 5000.0] {
            let below = StudentizedRange::new(3, df).unwrap();
            let above = StudentizedRange::new(3, df + 1.0).unwrap();
            let p = below.cdf(3.3);
            assert!(p > 0.9 && p < 1.0);
            assert_abs_diff_eq!(p, above.cdf(3.3), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(StudentizedRange::new(1, 10.0).is_err());
        assert!(StudentizedRange::new(3, 1.0).is_err());
        assert!(StudentizedRange::new(3, f64::NAN).is_err());
    }
}
