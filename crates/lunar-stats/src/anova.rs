//! Two-way analysis of variance with interaction.
//!
//! The response is decomposed into a factor A effect, a factor B effect,
//! their interaction, and the residual variation within cells:
//!
//! ```text
//! SS_total = SS_A + SS_B + SS_AB + SS_residual
//! ```
//!
//! Every `(a, b)` cell must hold at least one observation. For balanced
//! designs the decomposition is the classical orthogonal one; for unbalanced
//! designs the interaction absorbs whatever between-cell variation the two
//! main effects leave unexplained.

use serde::Serialize;
use tracing::debug;

use crate::{
    distribution::{ContinuousDistribution, FDistribution},
    error::{self, StatsError, StatsResult},
};

/// Observations of a two-factor design, indexed by level.
///
/// Levels are `0..levels_a` for factor A and `0..levels_b` for factor B.
/// Insertion order is kept so fitted values and residuals line up with the
/// order in which observations were pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoWayLayout {
    levels_a: usize,
    levels_b: usize,
    observations: Vec<(usize, usize, f64)>,
}

impl TwoWayLayout {
    #[must_use]
    pub fn new(levels_a: usize, levels_b: usize) -> Self {
        Self {
            levels_a,
            levels_b,
            observations: vec![],
        }
    }

    /// Records response `y` for level `a` of factor A and level `b` of factor B.
    ///
    /// # Panics
    ///
    /// Panics if either level index is out of range.
    pub fn push(&mut self, a: usize, b: usize, y: f64) {
        assert!(a < self.levels_a, "factor A level {a} out of range");
        assert!(b < self.levels_b, "factor B level {b} out of range");
        self.observations.push((a, b, y));
    }

    #[must_use]
    pub fn levels_a(&self) -> usize {
        self.levels_a
    }

    #[must_use]
    pub fn levels_b(&self) -> usize {
        self.levels_b
    }

    /// Index of cell `(a, b)` in [`AnovaFit::cell_means`].
    #[must_use]
    pub fn cell_index(&self, a: usize, b: usize) -> usize {
        a * self.levels_b + b
    }

    fn responses(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|&(_, _, y)| y)
    }
}

/// Mean and size of one level (or cell) of a factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelMean {
    pub mean: f64,
    pub count: usize,
}

/// One line of an ANOVA table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnovaRow {
    pub df: f64,
    pub sum_sq: f64,
    pub mean_sq: f64,
    /// F statistic; `None` for the residual and total rows.
    pub f_value: Option<f64>,
    /// Upper-tail probability of `f_value`; `None` for the residual and total rows.
    pub p_value: Option<f64>,
}

impl AnovaRow {
    fn term(df: f64, sum_sq: f64, residual_mean_sq: f64, f_dist: FDistribution) -> Self {
        let mean_sq = sum_sq / df;
        let f_value = mean_sq / residual_mean_sq;
        Self {
            df,
            sum_sq,
            mean_sq,
            f_value: Some(f_value),
            p_value: Some(f_dist.sf(f_value)),
        }
    }

    fn unscored(df: f64, sum_sq: f64) -> Self {
        Self {
            df,
            sum_sq,
            mean_sq: sum_sq / df,
            f_value: None,
            p_value: None,
        }
    }
}

/// Term of the two-way model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Term {
    FactorA,
    FactorB,
    Interaction,
    Residual,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaTable {
    pub factor_a: AnovaRow,
    pub factor_b: AnovaRow,
    pub interaction: AnovaRow,
    pub residual: AnovaRow,
    pub total: AnovaRow,
}

impl AnovaTable {
    /// Rows in conventional display order.
    #[must_use]
    pub fn rows(&self) -> [(Term, &AnovaRow); 5] {
        [
            (Term::FactorA, &self.factor_a),
            (Term::FactorB, &self.factor_b),
            (Term::Interaction, &self.interaction),
            (Term::Residual, &self.residual),
            (Term::Total, &self.total),
        ]
    }

    #[must_use]
    pub fn row(&self, term: Term) -> &AnovaRow {
        match term {
            Term::FactorA => &self.factor_a,
            Term::FactorB => &self.factor_b,
            Term::Interaction => &self.interaction,
            Term::Residual => &self.residual,
            Term::Total => &self.total,
        }
    }
}

/// Result of fitting the two-way model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaFit {
    pub table: AnovaTable,
    pub grand_mean: f64,
    pub levels_a: Vec<LevelMean>,
    pub levels_b: Vec<LevelMean>,
    /// Cell means indexed by [`TwoWayLayout::cell_index`].
    pub cell_means: Vec<LevelMean>,
    /// Fitted value (cell mean) of each observation, in insertion order.
    pub fitted: Vec<f64>,
    /// Observed minus fitted, in insertion order.
    pub residuals: Vec<f64>,
}

impl AnovaFit {
    /// Residual mean square, the error variance estimate used by post-hoc tests.
    #[must_use]
    pub fn mse(&self) -> f64 {
        self.table.residual.mean_sq
    }

    #[must_use]
    pub fn df_residual(&self) -> f64 {
        self.table.residual.df
    }
}

/// Two-way ANOVA with interaction.
pub struct TwoWayAnova;

impl TwoWayAnova {
    /// Fits the full factorial model `y ~ A * B`.
    ///
    /// # Errors
    ///
    /// * [`StatsError::NonFiniteValue`] if a response is NaN or infinite
    /// * [`StatsError::DegenerateDesign`] if a factor has fewer than two levels,
    ///   a cell is empty, or no residual degrees of freedom remain
    /// * [`StatsError::ZeroVariance`] if every cell is constant
    ///
    /// # Examples
    ///
    /// ```
    /// use lunar_stats::anova::{TwoWayAnova, TwoWayLayout};
    ///
    /// let mut layout = TwoWayLayout::new(2, 2);
    /// for (a, b, y) in [(0, 0, 1.0), (0, 0, 3.0), (0, 1, 2.0), (0, 1, 4.0),
    ///                   (1, 0, 5.0), (1, 0, 7.0), (1, 1, 6.0), (1, 1, 8.0)] {
    ///     layout.push(a, b, y);
    /// }
    /// let fit = TwoWayAnova::fit(&layout).unwrap();
    /// assert!((fit.table.factor_a.sum_sq - 32.0).abs() < 1e-12);
    /// assert!((fit.table.residual.sum_sq - 8.0).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(layout: &TwoWayLayout) -> StatsResult<AnovaFit> {
        let responses = layout.responses().collect::<Vec<_>>();
        error::ensure_finite(&responses)?;
        if layout.levels_a < 2 || layout.levels_b < 2 {
            return Err(StatsError::degenerate(format!(
                "each factor needs at least two levels, got {} x {}",
                layout.levels_a, layout.levels_b
            )));
        }

        let n = responses.len();
        let num_cells = layout.levels_a * layout.levels_b;
        if n <= num_cells {
            return Err(StatsError::degenerate(format!(
                "{n} observations leave no residual degrees of freedom for {num_cells} cells"
            )));
        }

        let mut sum_a = vec![(0.0, 0_usize); layout.levels_a];
        let mut sum_b = vec![(0.0, 0_usize); layout.levels_b];
        let mut sum_cell = vec![(0.0, 0_usize); num_cells];
        for &(a, b, y) in &layout.observations {
            for slot in [
                &mut sum_a[a],
                &mut sum_b[b],
                &mut sum_cell[layout.cell_index(a, b)],
            ] {
                slot.0 += y;
                slot.1 += 1;
            }
        }
        if let Some(empty) = sum_cell.iter().position(|&(_, count)| count == 0) {
            return Err(StatsError::degenerate(format!(
                "cell ({}, {}) has no observations",
                empty / layout.levels_b,
                empty % layout.levels_b
            )));
        }

        let to_means = |sums: Vec<(f64, usize)>| {
            sums.into_iter()
                .map(|(sum, count)| LevelMean {
                    mean: sum / count as f64,
                    count,
                })
                .collect::<Vec<_>>()
        };
        let levels_a = to_means(sum_a);
        let levels_b = to_means(sum_b);
        let cell_means = to_means(sum_cell);

        let grand_mean = responses.iter().sum::<f64>() / n as f64;
        let between = |levels: &[LevelMean]| {
            levels
                .iter()
                .map(|l| l.count as f64 * (l.mean - grand_mean).powi(2))
                .sum::<f64>()
        };
        let ss_total = responses
            .iter()
            .map(|y| (y - grand_mean).powi(2))
            .sum::<f64>();
        let ss_a = between(&levels_a);
        let ss_b = between(&levels_b);
        let ss_cells = between(&cell_means);
        let mut ss_ab = ss_cells - ss_a - ss_b;
        if ss_ab < 0.0 {
            // Unbalanced cells can make the sequential remainder negative
            debug!(ss_ab, "clamping negative interaction sum of squares to zero");
            ss_ab = 0.0;
        }

        let fitted = layout
            .observations
            .iter()
            .map(|&(a, b, _)| cell_means[layout.cell_index(a, b)].mean)
            .collect::<Vec<_>>();
        let residuals = responses
            .iter()
            .zip(&fitted)
            .map(|(y, f)| y - f)
            .collect::<Vec<_>>();
        let ss_residual = residuals.iter().map(|r| r * r).sum::<f64>();
        if ss_residual <= 1e-12 * ss_total.max(f64::MIN_POSITIVE) {
            return Err(StatsError::ZeroVariance);
        }

        let df_a = (layout.levels_a - 1) as f64;
        let df_b = (layout.levels_b - 1) as f64;
        let df_ab = df_a * df_b;
        let df_residual = (n - num_cells) as f64;
        let residual = AnovaRow::unscored(df_residual, ss_residual);

        let table = AnovaTable {
            factor_a: AnovaRow::term(
                df_a,
                ss_a,
                residual.mean_sq,
                FDistribution::new(df_a, df_residual)?,
            ),
            factor_b: AnovaRow::term(
                df_b,
                ss_b,
                residual.mean_sq,
                FDistribution::new(df_b, df_residual)?,
            ),
            interaction: AnovaRow::term(
                df_ab,
                ss_ab,
                residual.mean_sq,
                FDistribution::new(df_ab, df_residual)?,
            ),
            residual,
            total: AnovaRow::unscored((n - 1) as f64, ss_total),
        };
        debug!(
            ss_a,
            ss_b, ss_ab, ss_residual, ss_total, "two-way sum of squares decomposition"
        );

        Ok(AnovaFit {
            table,
            grand_mean,
            levels_a,
            levels_b,
            cell_means,
            fitted,
            residuals,
        })
    }
}
