//! Checks of the ANOVA assumptions.
//!
//! Both checks are advisory: a violation is reported and logged but never
//! stops the analysis.

use lunar_stats::{
    levene::{self, LeveneCenter, LeveneResult},
    shapiro_wilk::{self, ShapiroWilkResult},
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    grouping,
    model::ModelFit,
    observation::Observation,
    outcome::{Outcome, Verdict},
};

/// A test result together with its reading at the configured alpha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssumptionCheck<T> {
    #[serde(flatten)]
    pub result: T,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assumptions {
    /// Homogeneity of variance across the `Moon × Season` cells.
    pub homogeneity: Outcome<AssumptionCheck<LeveneResult>>,
    /// Normality of the model residuals.
    pub normality: Outcome<AssumptionCheck<ShapiroWilkResult>>,
}

impl Assumptions {
    #[must_use]
    pub fn check(
        observations: &[Observation],
        model: &ModelFit,
        center: LeveneCenter,
        alpha: f64,
    ) -> Self {
        Self {
            homogeneity: homogeneity(observations, center, alpha),
            normality: normality(model.residuals(), alpha),
        }
    }
}

/// Levene's test over the crossed `Moon × Season` groups.
#[must_use]
pub fn homogeneity(
    observations: &[Observation],
    center: LeveneCenter,
    alpha: f64,
) -> Outcome<AssumptionCheck<LeveneResult>> {
    let groups = grouping::by_moon_and_season(observations)
        .into_values()
        .map(|group| group.iter().map(|o| o.admissions).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let result = levene::test(&groups, center).map(|result| {
        let verdict = Verdict::from_p_value(result.p_value, alpha);
        info!(
            %center,
            f = result.statistic,
            p = result.p_value,
            "levene test"
        );
        if verdict == Verdict::Violated {
            warn!(p = result.p_value, alpha, "variances differ across Moon × Season cells");
        }
        AssumptionCheck { result, verdict }
    });
    Outcome::record("Levene test", result)
}

/// Shapiro–Wilk test on the model residuals.
#[must_use]
pub fn normality(residuals: &[f64], alpha: f64) -> Outcome<AssumptionCheck<ShapiroWilkResult>> {
    let result = shapiro_wilk::test(residuals).map(|result| {
        let verdict = Verdict::from_p_value(result.p_value, alpha);
        info!(w = result.statistic, p = result.p_value, "shapiro-wilk test");
        if verdict == Verdict::Violated {
            warn!(p = result.p_value, alpha, "residuals depart from normality");
        }
        AssumptionCheck { result, verdict }
    });
    Outcome::record("Shapiro-Wilk test", result)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        label::{Month, MoonPhase},
        model, testdata,
    };

    #[test]
    fn test_moon_dataset_satisfies_both() {
        let dataset = testdata::dataset();
        let model = model::fit(dataset.observations()).unwrap();
        let checks = Assumptions::check(dataset.observations(), &model, LeveneCenter::Median, 0.05);

        let levene = checks.homogeneity.completed().unwrap();
        assert_eq!(levene.verdict, Verdict::Satisfied);
        assert_eq!(levene.result.df_between, 11.0);
        assert_eq!(levene.result.df_within, 24.0);
        assert_abs_diff_eq!(levene.result.statistic, 1.153_65, epsilon = 1e-4);

        let shapiro = checks.normality.completed().unwrap();
        assert_eq!(shapiro.verdict, Verdict::Satisfied);
        assert_eq!(shapiro.result.n, 36);
        assert_abs_diff_eq!(shapiro.result.statistic, 0.946_944, epsilon = 1e-4);
    }

    #[test]
    fn test_mean_center_flags_unequal_variances() {
        let dataset = testdata::dataset();
        let check = homogeneity(dataset.observations(), LeveneCenter::Mean, 0.05);
        let levene = check.completed().unwrap();
        assert_eq!(levene.result.center, LeveneCenter::Mean);
        assert!(levene.result.p_value < 0.05);
        assert_eq!(levene.verdict, Verdict::Violated);
    }

    #[test]
    fn test_failures_are_recorded() {
        let check = normality(&[1.0, 2.0], 0.05);
        assert!(matches!(check, Outcome::Failed { .. }));

        let single = [Observation::new(Month::Jan, MoonPhase::After, 3.0)];
        let check = homogeneity(&single, LeveneCenter::Median, 0.05);
        assert!(matches!(check, Outcome::Failed { .. }));
    }

    #[test]
    fn test_serialized_check_is_flat() {
        let check = normality(&[1.0, 2.5, 2.0, 4.0, 3.1], 0.05);
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["result"]["n"], 5);
        assert_eq!(json["result"]["verdict"], "satisfied");
    }
}
