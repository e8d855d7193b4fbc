//! Tukey's honestly significant difference.
//!
//! All pairs of levels within one comparison family share a single
//! studentized range distribution, so both the adjusted p-values and the
//! simultaneous confidence intervals control the family-wise error rate.
//! The Tukey–Kramer standard error handles unequal level sizes.

use serde::Serialize;

use crate::{
    anova::LevelMean,
    distribution::{ContinuousDistribution, StudentizedRange},
    error::{self, StatsError, StatsResult},
};

/// One pairwise comparison.
///
/// `diff` is `mean[first] - mean[second]`, where `first` is the later of the
/// two levels in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TukeyComparison {
    pub first: usize,
    pub second: usize,
    pub diff: f64,
    pub lower: f64,
    pub upper: f64,
    pub p_adj: f64,
}

impl TukeyComparison {
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_adj < alpha
    }

    /// Whether this comparison is between levels `a` and `b`, in either order.
    #[must_use]
    pub fn involves(&self, a: usize, b: usize) -> bool {
        (self.first, self.second) == (a, b) || (self.first, self.second) == (b, a)
    }
}

/// A family of Tukey comparisons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TukeyHsd {
    pub confidence_level: f64,
    /// Critical value of the studentized range at `confidence_level`.
    pub critical_value: f64,
    pub mse: f64,
    pub df: f64,
    pub comparisons: Vec<TukeyComparison>,
}

impl TukeyHsd {
    /// Compares every pair of `levels`.
    ///
    /// # Arguments
    ///
    /// * `levels` - Mean and size of each level, in declaration order
    /// * `mse` - Residual mean square of the fitted model
    /// * `df` - Residual degrees of freedom of the fitted model
    /// * `confidence_level` - Family-wise confidence of the intervals, e.g. `0.95`
    ///
    /// # Errors
    ///
    /// * [`StatsError::InsufficientSample`] with fewer than two levels
    /// * [`StatsError::DegenerateDesign`] if a level has no observations
    /// * [`StatsError::InvalidParameter`] for a non-positive `mse`, `df` below 2,
    ///   or a confidence level outside `(0, 1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use lunar_stats::{anova::LevelMean, tukey::TukeyHsd};
    ///
    /// let levels = [
    ///     LevelMean { mean: 10.0, count: 9 },
    ///     LevelMean { mean: 15.0, count: 9 },
    /// ];
    /// let hsd = TukeyHsd::new(&levels, 4.0, 16.0, 0.95).unwrap();
    /// let pair = &hsd.comparisons[0];
    /// assert_eq!((pair.first, pair.second), (1, 0));
    /// assert_eq!(pair.diff, 5.0);
    /// assert!(pair.is_significant(0.05));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(
        levels: &[LevelMean],
        mse: f64,
        df: f64,
        confidence_level: f64,
    ) -> StatsResult<Self> {
        error::ensure_probability("confidence_level", confidence_level)?;
        if !(mse.is_finite() && mse > 0.0) {
            return Err(StatsError::InvalidParameter {
                name: "mse",
                value: mse,
            });
        }
        if let Some(i) = levels.iter().position(|l| l.count == 0) {
            return Err(StatsError::degenerate(format!("level {i} has no observations")));
        }
        let dist = StudentizedRange::new(levels.len(), df)?;
        let critical_value = dist.quantile(confidence_level);

        let mut comparisons = Vec::with_capacity(levels.len() * (levels.len() - 1) / 2);
        for (second, low) in levels.iter().enumerate() {
            for (first, high) in levels.iter().enumerate().skip(second + 1) {
                let diff = high.mean - low.mean;
                let se = (0.5 * mse * (1.0 / high.count as f64 + 1.0 / low.count as f64)).sqrt();
                let margin = critical_value * se;
                comparisons.push(TukeyComparison {
                    first,
                    second,
                    diff,
                    lower: diff - margin,
                    upper: diff + margin,
                    p_adj: dist.sf(diff.abs() / se).clamp(0.0, 1.0),
                });
            }
        }

        Ok(Self {
            confidence_level,
            critical_value,
            mse,
            df,
            comparisons,
        })
    }

    /// The comparison between levels `a` and `b`, in either order.
    #[must_use]
    pub fn find(&self, a: usize, b: usize) -> Option<&TukeyComparison> {
        self.comparisons.iter().find(|c| c.involves(a, b))
    }

    /// Comparisons whose adjusted p-value is below `alpha`.
    pub fn significant(&self, alpha: f64) -> impl Iterator<Item = &TukeyComparison> {
        self.comparisons
            .iter()
            .filter(move |c| c.is_significant(alpha))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{anova::TwoWayAnova, fixtures};

    const WINTER: usize = 0;
    const SPRING: usize = 1;
    const SUMMER: usize = 2;
    const FALL: usize = 3;

    fn season_hsd() -> TukeyHsd {
        let fit = TwoWayAnova::fit(&fixtures::layout()).unwrap();
        TukeyHsd::new(&fit.levels_b, fit.mse(), fit.df_residual(), 0.95).unwrap()
    }

    #[test]
    fn test_phase_comparisons() {
        let fit = TwoWayAnova::fit(&fixtures::layout()).unwrap();
        let hsd = TukeyHsd::new(&fit.levels_a, fit.mse(), fit.df_residual(), 0.95).unwrap();
        assert_abs_diff_eq!(hsd.critical_value, 3.531_697, epsilon = 1e-4);

        let pairs = hsd
            .comparisons
            .iter()
            .map(|c| (c.first, c.second))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(1, 0), (2, 0), (2, 1)]);

        let during_before = hsd.find(0, 1).unwrap();
        assert_abs_diff_eq!(during_before.diff, 2.416_667, epsilon = 1e-6);
        assert_abs_diff_eq!(during_before.lower, -1.336_887, epsilon = 1e-3);
        assert_abs_diff_eq!(during_before.upper, 6.170_22, epsilon = 1e-3);
        assert_abs_diff_eq!(during_before.p_adj, 0.261_78, epsilon = 1e-3);
        assert_abs_diff_eq!(hsd.find(0, 2).unwrap().p_adj, 0.931_12, epsilon = 1e-3);
        assert_abs_diff_eq!(hsd.find(1, 2).unwrap().p_adj, 0.437_77, epsilon = 1e-3);
        assert_eq!(hsd.significant(0.05).count(), 0);
    }

    #[test]
    fn test_season_comparisons() {
        let hsd = season_hsd();
        let spring_winter = hsd.find(WINTER, SPRING).unwrap();
        assert_abs_diff_eq!(spring_winter.diff, 5.077_778, epsilon = 1e-6);
        assert_abs_diff_eq!(spring_winter.lower, 0.290_004, epsilon = 1e-3);
        assert_abs_diff_eq!(spring_winter.upper, 9.865_552, epsilon = 1e-3);
        assert_abs_diff_eq!(spring_winter.p_adj, 0.034_803, epsilon = 1e-3);

        let fall_spring = hsd.find(FALL, SPRING).unwrap();
        assert_abs_diff_eq!(fall_spring.diff, -6.122_222, epsilon = 1e-6);
        assert_abs_diff_eq!(fall_spring.p_adj, 0.008_715_8, epsilon = 1e-3);

        assert_abs_diff_eq!(hsd.find(SUMMER, SPRING).unwrap().diff, -3.9, epsilon = 1e-9);
        assert_abs_diff_eq!(hsd.find(WINTER, SUMMER).unwrap().p_adj, 0.904_18, epsilon = 1e-3);
        assert_abs_diff_eq!(hsd.find(WINTER, FALL).unwrap().p_adj, 0.930_50, epsilon = 1e-3);
        assert_abs_diff_eq!(hsd.find(SUMMER, FALL).unwrap().p_adj, 0.583_74, epsilon = 1e-3);

        let significant = hsd
            .significant(0.05)
            .map(|c| (c.first, c.second))
            .collect::<Vec<_>>();
        assert_eq!(significant, vec![(SPRING, WINTER), (FALL, SPRING)]);
    }

    #[test]
    fn test_interaction_has_no_significant_pair() {
        let fit = TwoWayAnova::fit(&fixtures::layout()).unwrap();
        let hsd = TukeyHsd::new(&fit.cell_means, fit.mse(), fit.df_residual(), 0.95).unwrap();
        assert_eq!(hsd.comparisons.len(), 66);
        assert_abs_diff_eq!(hsd.critical_value, 5.099_130, epsilon = 1e-3);
        let min_p = hsd
            .comparisons
            .iter()
            .map(|c| c.p_adj)
            .fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(min_p, 0.059_26, epsilon = 1e-3);
        assert_eq!(hsd.significant(0.05).count(), 0);
    }

    #[test]
    fn test_invalid_inputs() {
        let levels = [
            LevelMean { mean: 1.0, count: 3 },
            LevelMean { mean: 2.0, count: 0 },
        ];
        assert!(matches!(
            TukeyHsd::new(&levels, 1.0, 10.0, 0.95),
            Err(StatsError::DegenerateDesign { .. })
        ));
        let levels = [LevelMean { mean: 1.0, count: 3 }];
        assert!(matches!(
            TukeyHsd::new(&levels, 1.0, 10.0, 0.95),
            Err(StatsError::InsufficientSample { .. })
        ));
        let levels = [
            LevelMean { mean: 1.0, count: 3 },
            LevelMean { mean: 2.0, count: 3 },
        ];
        assert!(TukeyHsd::new(&levels, 0.0, 10.0, 0.95).is_err());
        assert!(TukeyHsd::new(&levels, 1.0, 10.0, 1.0).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_intervals_are_symmetric(
            means in prop::collection::vec(-50.0_f64..50.0, 2..5),
            counts in prop::collection::vec(1_usize..10, 5),
            mse in 0.1_f64..20.0,
        ) {
            let levels = means
                .iter()
                .zip(&counts)
                .map(|(&mean, &count)| LevelMean { mean, count })
                .collect::<Vec<_>>();
            let hsd = TukeyHsd::new(&levels, mse, 20.0, 0.95).unwrap();
            for c in &hsd.comparisons {
                let center = 0.5 * (c.lower + c.upper);
                prop_assert!((center - c.diff).abs() < 1e-9 * (1.0 + c.diff.abs()));
                prop_assert!(c.lower <= c.diff && c.diff <= c.upper);
                prop_assert!((0.0..=1.0).contains(&c.p_adj));
            }
        }
    }
}
