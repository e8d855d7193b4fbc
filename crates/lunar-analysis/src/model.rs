//! The two-way model `Admission ~ Moon * Season`.

use lunar_stats::{
    StatsResult,
    anova::{AnovaFit, AnovaRow, Term, TwoWayAnova, TwoWayLayout},
};
use serde::Serialize;
use tracing::info;

use crate::{
    label::{Label, Month, MoonPhase, Season},
    observation::Observation,
};

/// One labeled line of the ANOVA table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermRow {
    pub term: &'static str,
    #[serde(flatten)]
    pub row: AnovaRow,
}

/// An observation alongside its fitted value (the cell mean).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedObservation {
    pub month: Month,
    pub moon: MoonPhase,
    pub observed: f64,
    pub fitted: f64,
    pub residual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFit {
    pub terms: Vec<TermRow>,
    pub mse: f64,
    pub df_residual: f64,
    pub fitted: Vec<FittedObservation>,
    #[serde(skip)]
    pub anova: AnovaFit,
}

impl ModelFit {
    #[must_use]
    pub fn row(&self, term: Term) -> &AnovaRow {
        self.anova.table.row(term)
    }

    #[must_use]
    pub fn residuals(&self) -> &[f64] {
        &self.anova.residuals
    }
}

/// Display name of a model term.
#[must_use]
pub fn term_name(term: Term) -> &'static str {
    match term {
        Term::FactorA => "Moon",
        Term::FactorB => "Season",
        Term::Interaction => "Moon:Season",
        Term::Residual => "Residuals",
        Term::Total => "Total",
    }
}

/// Fits the two-way model with interaction.
///
/// Factor A is the moon phase and factor B the season, so level indices
/// follow [`Label::index`].
pub fn fit(observations: &[Observation]) -> StatsResult<ModelFit> {
    let mut layout = TwoWayLayout::new(MoonPhase::ALL.len(), Season::ALL.len());
    for obs in observations {
        layout.push(obs.moon.index(), obs.season.index(), obs.admissions);
    }
    let anova = TwoWayAnova::fit(&layout)?;

    let terms = anova
        .table
        .rows()
        .into_iter()
        .map(|(term, row)| TermRow {
            term: term_name(term),
            row: *row,
        })
        .collect();
    let fitted = observations
        .iter()
        .zip(anova.fitted.iter().zip(&anova.residuals))
        .map(|(obs, (&fitted, &residual))| FittedObservation {
            month: obs.month,
            moon: obs.moon,
            observed: obs.admissions,
            fitted,
            residual,
        })
        .collect();

    for (term, row) in anova.table.rows() {
        if let (Some(f), Some(p)) = (row.f_value, row.p_value) {
            info!(term = term_name(term), df = row.df, f, p, "anova term");
        }
    }

    Ok(ModelFit {
        terms,
        mse: anova.mse(),
        df_residual: anova.df_residual(),
        fitted,
        anova,
    })
}
