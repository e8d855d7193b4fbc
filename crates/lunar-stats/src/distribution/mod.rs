//! Continuous probability distributions used to turn test statistics into
//! p-values and critical values.
//!
//! Each distribution validates its parameters on construction and is cheap to
//! copy afterwards.

mod f;
mod student_t;
mod studentized_range;

pub use self::{f::FDistribution, student_t::StudentT, studentized_range::StudentizedRange};

/// Common interface of the continuous distributions.
pub trait ContinuousDistribution {
    /// Cumulative distribution function `P(X <= x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Survival function `P(X > x)`.
    ///
    /// Implementations override this when the upper tail can be computed
    /// without cancellation.
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Quantile function, the inverse of [`cdf`](Self::cdf).
    ///
    /// `p` must lie in the open interval `(0, 1)`; other values yield NaN.
    fn quantile(&self, p: f64) -> f64;
}

/// Inverts a monotone CDF by bracketing and bisection.
///
/// Used by distributions without a closed-form or series quantile.
pub(crate) fn invert_cdf<F>(cdf: F, p: f64, lower: f64, initial_upper: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    let mut lo = lower;
    let mut hi = initial_upper;
    while cdf(hi) < p {
        lo = hi;
        hi *= 2.0;
        if !hi.is_finite() {
            return f64::INFINITY;
        }
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
            break;
        }
    }
    0.5 * (lo + hi)
}
