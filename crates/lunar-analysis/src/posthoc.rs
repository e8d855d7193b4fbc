//! Tukey HSD comparison families for the fitted model.
//!
//! Each factor forms its own family; levels of different factors are never
//! compared with each other. The interaction family compares all
//! `Moon × Season` cells.

use lunar_stats::{StatsResult, anova::LevelMean, tukey::TukeyHsd};
use serde::Serialize;
use tracing::debug;

use crate::{
    config::AnalysisConfig,
    label::{Label, MoonPhase, Season},
    model::ModelFit,
    outcome::Outcome,
};

/// One labeled pairwise comparison.
///
/// `diff` is the mean of `first` minus the mean of `second`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: String,
    pub second: String,
    pub diff: f64,
    pub lower: f64,
    pub upper: f64,
    pub p_adj: f64,
    pub significant: bool,
}

impl Comparison {
    /// `"first-second"`, the conventional pair label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.first, self.second)
    }

    /// Whether this comparison is between `a` and `b`, in either order.
    #[must_use]
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonFamily {
    pub confidence_level: f64,
    pub critical_value: f64,
    pub comparisons: Vec<Comparison>,
}

impl ComparisonFamily {
    #[must_use]
    pub fn find(&self, a: &str, b: &str) -> Option<&Comparison> {
        self.comparisons.iter().find(|c| c.involves(a, b))
    }

    pub fn significant(&self) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter().filter(|c| c.significant)
    }
}

/// Tukey results for one factor (or the interaction).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posthoc {
    pub factor: &'static str,
    pub outcome: Outcome<ComparisonFamily>,
}

/// Runs every configured comparison family.
#[must_use]
pub fn compare(model: &ModelFit, config: &AnalysisConfig) -> Vec<Posthoc> {
    let anova = &model.anova;
    let mut families = vec![
        family("Moon", &labels::<MoonPhase>(), &anova.levels_a, model, config),
        family("Season", &labels::<Season>(), &anova.levels_b, model, config),
    ];
    if config.interaction_posthoc {
        families.push(family(
            "Moon:Season",
            &cell_labels(),
            &anova.cell_means,
            model,
            config,
        ));
    }
    families
}

fn family(
    factor: &'static str,
    labels: &[String],
    levels: &[LevelMean],
    model: &ModelFit,
    config: &AnalysisConfig,
) -> Posthoc {
    let result = tukey(labels, levels, model, config);
    if let Ok(family) = &result {
        debug!(
            factor,
            critical_value = family.critical_value,
            significant = family.significant().count(),
            "tukey family"
        );
    }
    Posthoc {
        factor,
        outcome: Outcome::record(&format!("Tukey HSD on {factor}"), result),
    }
}

fn tukey(
    labels: &[String],
    levels: &[LevelMean],
    model: &ModelFit,
    config: &AnalysisConfig,
) -> StatsResult<ComparisonFamily> {
    let hsd = TukeyHsd::new(levels, model.mse, model.df_residual, config.confidence_level)?;
    let comparisons = hsd
        .comparisons
        .iter()
        .map(|c| Comparison {
            first: labels[c.first].clone(),
            second: labels[c.second].clone(),
            diff: c.diff,
            lower: c.lower,
            upper: c.upper,
            p_adj: c.p_adj,
            significant: c.is_significant(config.alpha),
        })
        .collect();
    Ok(ComparisonFamily {
        confidence_level: hsd.confidence_level,
        critical_value: hsd.critical_value,
        comparisons,
    })
}

fn labels<L: Label>() -> Vec<String> {
    L::ALL.iter().map(ToString::to_string).collect()
}

/// `"Moon:Season"` labels in cell-index order (moon-major).
fn cell_labels() -> Vec<String> {
    MoonPhase::ALL
        .iter()
        .flat_map(|moon| Season::ALL.iter().map(move |season| format!("{moon}:{season}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{model, testdata};

    fn families(config: &AnalysisConfig) -> Vec<Posthoc> {
        let dataset = testdata::dataset();
        let model = model::fit(dataset.observations()).unwrap();
        compare(&model, config)
    }

    #[test]
    fn test_season_pairs() {
        let families = families(&AnalysisConfig::default());
        let season = families[1].outcome.completed().unwrap();
        assert_eq!(families[1].factor, "Season");
        assert_eq!(season.comparisons.len(), 6);

        let spring_fall = season.find("Spring", "Fall").unwrap();
        assert_eq!(spring_fall.label(), "Fall-Spring");
        assert!(spring_fall.significant);
        let winter_spring = season.find("Winter", "Spring").unwrap();
        assert_eq!(winter_spring.label(), "Spring-Winter");
        assert_abs_diff_eq!(winter_spring.diff, 5.077_778, epsilon = 1e-6);
        assert!(winter_spring.significant);
        assert_eq!(season.significant().count(), 2);
    }

    #[test]
    fn test_no_moon_or_interaction_pair_is_significant() {
        let families = families(&AnalysisConfig::default());
        assert_eq!(families.len(), 3);

        let moon = families[0].outcome.completed().unwrap();
        assert_eq!(moon.comparisons[0].label(), "During-Before");
        assert_eq!(moon.significant().count(), 0);

        let cells = families[2].outcome.completed().unwrap();
        assert_eq!(families[2].factor, "Moon:Season");
        assert_eq!(cells.comparisons.len(), 66);
        assert_eq!(cells.comparisons[0].label(), "Before:Spring-Before:Winter");
        assert_eq!(cells.significant().count(), 0);
    }

    #[test]
    fn test_interaction_family_is_optional() {
        let config = AnalysisConfig {
            interaction_posthoc: false,
            ..AnalysisConfig::default()
        };
        assert_eq!(families(&config).len(), 2);
    }

    #[test]
    fn test_cell_labels_follow_cell_index() {
        let labels = cell_labels();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "Before:Winter");
        assert_eq!(labels[MoonPhase::During.index() * 4 + Season::Fall.index()], "During:Fall");
    }
}
