use super::{ContinuousDistribution, invert_cdf};
use crate::{
    error::{StatsError, StatsResult},
    special,
};

/// Student's t distribution with `df` degrees of freedom.
///
/// # Examples
///
/// ```
/// use lunar_stats::distribution::{ContinuousDistribution, StudentT};
///
/// let t = StudentT::new(10.0).unwrap();
/// let p = t.two_sided_p_value(2.0);
/// assert!((p - 0.073_388).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    pub fn new(df: f64) -> StatsResult<Self> {
        if !(df.is_finite() && df > 0.0) {
            return Err(StatsError::InvalidParameter {
                name: "df",
                value: df,
            });
        }
        Ok(Self { df })
    }

    #[must_use]
    pub fn df(&self) -> f64 {
        self.df
    }

    /// `P(|T| >= |t|)`.
    #[must_use]
    pub fn two_sided_p_value(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        special::beta_inc(0.5 * self.df, 0.5, self.df / (self.df + t * t))
    }

    fn tail(&self, t: f64) -> f64 {
        0.5 * self.two_sided_p_value(t)
    }
}

impl ContinuousDistribution for StudentT {
    fn cdf(&self, x: f64) -> f64 {
        if x > 0.0 {
            1.0 - self.tail(x)
        } else {
            self.tail(x)
        }
    }

    fn sf(&self, x: f64) -> f64 {
        self.cdf(-x)
    }

    fn quantile(&self, p: f64) -> f64 {
        if p < 0.5 {
            return -self.quantile(1.0 - p);
        }
        if p == 0.5 {
            return 0.0;
        }
        invert_cdf(|x| self.cdf(x), p, 0.0, 1.0)
    }
}
