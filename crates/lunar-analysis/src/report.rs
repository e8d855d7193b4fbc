//! The complete analysis, stage by stage.

use serde::Serialize;
use tracing::info;

use crate::{
    assumptions::Assumptions,
    config::AnalysisConfig,
    contingency::{self, ContingencyTable},
    dataset::Dataset,
    error::AnalysisError,
    label::{MoonPhase, Season},
    model::{self, ModelFit},
    narrative,
    observation::Observation,
    pairwise::{self, PairwiseTest},
    posthoc::{self, Posthoc},
    summary::Figures,
};

/// Every statistic the report presents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    pub observations: Vec<Observation>,
    pub contingency: ContingencyTable<Season, MoonPhase>,
    pub figures: Figures,
    pub assumptions: Assumptions,
    pub model: ModelFit,
    pub posthoc: Vec<Posthoc>,
    pub t_tests: Vec<PairwiseTest>,
    pub narrative: Vec<String>,
}

/// Runs the analysis over a validated dataset.
///
/// # Errors
///
/// Fails on an invalid configuration, or when the ANOVA cannot be fitted.
/// Every other test records its own failure in the report.
pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    config
        .validate()
        .map_err(|source| AnalysisError::Config { source })?;
    let observations = dataset.observations();
    info!(observations = observations.len(), alpha = config.alpha, "starting analysis");

    let contingency = contingency::season_by_moon(observations);
    let figures = Figures::new(observations, config.histogram_bins);
    info!("descriptive summaries ready");

    let model = model::fit(observations).map_err(|source| AnalysisError::Stats {
        stage: "two-way ANOVA",
        source,
    })?;
    let assumptions = Assumptions::check(observations, &model, config.levene_center, config.alpha);
    let posthoc = posthoc::compare(&model, config);
    info!(families = posthoc.len(), "post-hoc comparisons done");
    let t_tests = pairwise::test_all(observations, config);
    info!(tests = t_tests.len(), "pairwise tests done");

    let narrative = narrative::interpret(&model, &assumptions, &posthoc, &t_tests, config.alpha);

    Ok(AnalysisReport {
        config: config.clone(),
        observations: observations.to_vec(),
        contingency,
        figures,
        assumptions,
        model,
        posthoc,
        t_tests,
        narrative,
    })
}
