//! Two-sample t-tests between chosen seasons.

use lunar_stats::t_test::{TTest, VarianceAssumption};
use serde::Serialize;
use tracing::info;

use crate::{
    config::{AnalysisConfig, SeasonPair},
    grouping,
    label::Season,
    observation::{self, Observation},
    outcome::Outcome,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseTest {
    pub first: Season,
    pub second: Season,
    pub outcome: Outcome<TTest>,
}

/// Compares two seasons; `first` is the minuend of the difference.
#[must_use]
pub fn test_pair(
    observations: &[Observation],
    pair: SeasonPair,
    variance: VarianceAssumption,
    confidence_level: f64,
) -> PairwiseTest {
    let seasons = grouping::by_season(observations);
    let sample = |season| {
        seasons
            .get(&season)
            .map(|group| observation::admissions(group))
            .unwrap_or_default()
    };
    let first = sample(pair.first);
    let second = sample(pair.second);

    let result = TTest::new(&first, &second, variance, confidence_level);
    if let Ok(t) = &result {
        info!(
            first = %pair.first,
            second = %pair.second,
            t = t.t,
            df = t.df,
            p = t.p_value,
            "t-test"
        );
    }
    PairwiseTest {
        first: pair.first,
        second: pair.second,
        outcome: Outcome::record(&format!("t-test {} vs {}", pair.first, pair.second), result),
    }
}

/// Runs every configured season comparison, in configuration order.
#[must_use]
pub fn test_all(observations: &[Observation], config: &AnalysisConfig) -> Vec<PairwiseTest> {
    config
        .t_tests
        .iter()
        .map(|&pair| {
            test_pair(
                observations,
                pair,
                config.variance_assumption(),
                config.confidence_level,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        label::{Month, MoonPhase},
        testdata,
    };

    #[test]
    fn test_default_pairs() {
        let dataset = testdata::dataset();
        let tests = test_all(dataset.observations(), &AnalysisConfig::default());
        assert_eq!(tests.len(), 2);

        let fall_spring = &tests[0];
        assert_eq!((fall_spring.first, fall_spring.second), (Season::Fall, Season::Spring));
        let t = fall_spring.outcome.completed().unwrap();
        assert_abs_diff_eq!(t.t, -3.981_04, epsilon = 1e-4);
        assert_eq!(t.df, 16.0);
        assert_abs_diff_eq!(t.p_value, 0.001_074, epsilon = 1e-5);
        assert_abs_diff_eq!(t.lower, -9.382_309, epsilon = 1e-4);
        assert_abs_diff_eq!(t.upper, -2.862_135, epsilon = 1e-4);

        let winter_spring = tests[1].outcome.completed().unwrap();
        assert_abs_diff_eq!(winter_spring.t, -3.400_59, epsilon = 1e-4);
        assert_abs_diff_eq!(winter_spring.p_value, 0.003_656, epsilon = 1e-5);
    }

    #[test]
    fn test_welch_variant() {
        let dataset = testdata::dataset();
        let result = test_pair(
            dataset.observations(),
            SeasonPair::new(Season::Fall, Season::Spring),
            VarianceAssumption::Unequal,
            0.95,
        );
        let t = result.outcome.completed().unwrap();
        assert_eq!(t.variance, VarianceAssumption::Unequal);
        assert_abs_diff_eq!(t.df, 14.733_989, epsilon = 1e-4);
        assert_abs_diff_eq!(t.p_value, 0.001_244_5, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_season_fails() {
        let observations = [
            Observation::new(Month::Jan, MoonPhase::Before, 3.0),
            Observation::new(Month::Feb, MoonPhase::During, 4.0),
        ];
        let result = test_pair(
            &observations,
            SeasonPair::new(Season::Winter, Season::Summer),
            VarianceAssumption::Equal,
            0.95,
        );
        assert!(matches!(result.outcome, Outcome::Failed { .. }));
    }
}
