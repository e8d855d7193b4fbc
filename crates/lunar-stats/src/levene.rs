//! Levene's test for homogeneity of variance.
//!
//! Each observation is replaced by its absolute deviation from its group
//! center, and a one-way ANOVA is run on those deviations. Centering on the
//! median gives the Brown–Forsythe variant, which is robust to skewed groups.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    descriptive,
    distribution::{ContinuousDistribution, FDistribution},
    error::{self, StatsError, StatsResult},
};

/// Location each group's deviations are measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeveneCenter {
    /// Brown–Forsythe.
    #[default]
    Median,
    /// Levene's original statistic.
    Mean,
}

impl fmt::Display for LeveneCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Median => f.write_str("median"),
            Self::Mean => f.write_str("mean"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown center `{text}`, expected `median` or `mean`")]
pub struct ParseCenterError {
    text: String,
}

impl FromStr for LeveneCenter {
    type Err = ParseCenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "median" => Ok(Self::Median),
            "mean" => Ok(Self::Mean),
            _ => Err(ParseCenterError { text: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeveneResult {
    pub center: LeveneCenter,
    pub statistic: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub p_value: f64,
}

/// Runs Levene's test over `groups`.
///
/// Singleton groups are kept: their only deviation is zero, which adds to the
/// group count without contributing within-group spread.
///
/// # Errors
///
/// * [`StatsError::InsufficientSample`] with fewer than two groups
/// * [`StatsError::DegenerateDesign`] if a group is empty or the total size
///   leaves no within-group degrees of freedom
/// * [`StatsError::ZeroVariance`] if the deviations have no within-group spread
///
/// # Examples
///
/// ```
/// use lunar_stats::levene::{self, LeveneCenter};
///
/// let groups = [vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 4.0, 6.0, 8.0], vec![1.0, 1.5, 2.0, 2.5]];
/// let result = levene::test(&groups, LeveneCenter::Median).unwrap();
/// assert!((result.statistic - 4.0).abs() < 1e-12);
/// assert_eq!((result.df_between, result.df_within), (2.0, 9.0));
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn test<G>(groups: &[G], center: LeveneCenter) -> StatsResult<LeveneResult>
where
    G: AsRef<[f64]>,
{
    let k = groups.len();
    if k < 2 {
        return Err(StatsError::InsufficientSample {
            required: 2,
            actual: k,
        });
    }

    let mut deviations = Vec::with_capacity(k);
    for (i, group) in groups.iter().enumerate() {
        let values = group.as_ref();
        error::ensure_finite(values)?;
        let location = match center {
            LeveneCenter::Median => descriptive::median(values),
            LeveneCenter::Mean => descriptive::mean(values),
        }
        .ok_or_else(|| StatsError::degenerate(format!("group {i} is empty")))?;
        deviations.push(values.iter().map(|v| (v - location).abs()).collect::<Vec<_>>());
    }

    let n = deviations.iter().map(Vec::len).sum::<usize>();
    if n <= k {
        return Err(StatsError::degenerate(format!(
            "{n} observations in {k} groups leave no within-group degrees of freedom"
        )));
    }

    let grand_mean = deviations.iter().flatten().sum::<f64>() / n as f64;
    let mut between = 0.0;
    let mut within = 0.0;
    for group in &deviations {
        let group_mean = group.iter().sum::<f64>() / group.len() as f64;
        between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        within += group.iter().map(|z| (z - group_mean).powi(2)).sum::<f64>();
    }
    if within <= f64::EPSILON * between.max(f64::MIN_POSITIVE) {
        return Err(StatsError::ZeroVariance);
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let statistic = (between / df_between) / (within / df_within);
    let p_value = FDistribution::new(df_between, df_within)?.sf(statistic);

    Ok(LeveneResult {
        center,
        statistic,
        df_between,
        df_within,
        p_value,
    })
}
