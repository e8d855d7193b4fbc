//! One-sentence readings of each test.

use lunar_stats::anova::Term;

use crate::{
    assumptions::Assumptions,
    model::{self, ModelFit},
    outcome::{Outcome, Verdict},
    pairwise::PairwiseTest,
    posthoc::Posthoc,
};

/// Formats a p-value with four decimals, or as `< 0.0001` below that.
///
/// # Examples
///
/// ```
/// use lunar_analysis::narrative::format_p;
///
/// assert_eq!(format_p(0.009_699_7), "0.0097");
/// assert_eq!(format_p(0.000_02), "< 0.0001");
/// ```
#[must_use]
pub fn format_p(p: f64) -> String {
    if p < 1e-4 {
        "< 0.0001".to_owned()
    } else {
        format!("{p:.4}")
    }
}

fn relation(p: f64, alpha: f64) -> &'static str {
    if p < alpha { "<" } else { "≥" }
}

/// Reading of one ANOVA term.
#[must_use]
pub fn anova_term(model: &ModelFit, term: Term, alpha: f64) -> Option<String> {
    let name = match term {
        Term::Interaction => "The interaction between Moon and Season",
        _ => model::term_name(term),
    };
    let p = model.row(term).p_value?;
    let effect = if p < alpha {
        "has a significant effect"
    } else {
        "has no significant effect"
    };
    Some(format!(
        "{name} {effect} on admissions (p = {} {} {alpha}).",
        format_p(p),
        relation(p, alpha)
    ))
}

#[must_use]
pub fn assumptions(checks: &Assumptions, alpha: f64) -> Vec<String> {
    let homogeneity = match &checks.homogeneity {
        Outcome::Completed(check) => {
            let p = check.result.p_value;
            match check.verdict {
                Verdict::Satisfied => format!(
                    "Variances are homogeneous across Moon × Season cells (Levene p = {} ≥ {alpha}).",
                    format_p(p)
                ),
                Verdict::Violated => format!(
                    "Variances differ across Moon × Season cells (Levene p = {} < {alpha}); treat the ANOVA with caution.",
                    format_p(p)
                ),
            }
        }
        Outcome::Failed { reason } => format!("Levene's test could not be computed: {reason}."),
    };
    let normality = match &checks.normality {
        Outcome::Completed(check) => {
            let p = check.result.p_value;
            match check.verdict {
                Verdict::Satisfied => format!(
                    "Residuals are consistent with normality (Shapiro–Wilk p = {} ≥ {alpha}).",
                    format_p(p)
                ),
                Verdict::Violated => format!(
                    "Residuals depart from normality (Shapiro–Wilk p = {} < {alpha}); treat the ANOVA with caution.",
                    format_p(p)
                ),
            }
        }
        Outcome::Failed { reason } => {
            format!("The Shapiro–Wilk test could not be computed: {reason}.")
        }
    };
    vec![homogeneity, normality]
}

#[must_use]
pub fn posthoc(family: &Posthoc, alpha: f64) -> String {
    let factor = family.factor;
    match &family.outcome {
        Outcome::Completed(comparisons) => {
            let significant = comparisons
                .significant()
                .map(|c| format!("{} (p adj = {})", c.label(), format_p(c.p_adj)))
                .collect::<Vec<_>>();
            if significant.is_empty() {
                format!("No pair of {factor} levels differs significantly at alpha = {alpha}.")
            } else {
                format!(
                    "Pairs of {factor} levels differing significantly at alpha = {alpha}: {}.",
                    significant.join(", ")
                )
            }
        }
        Outcome::Failed { reason } => {
            format!("Tukey HSD on {factor} could not be computed: {reason}.")
        }
    }
}

#[must_use]
pub fn t_test(test: &PairwiseTest, alpha: f64) -> String {
    let (first, second) = (test.first, test.second);
    match &test.outcome {
        Outcome::Completed(t) => {
            let direction = if t.diff < 0.0 { "lower" } else { "higher" };
            let verdict = if t.is_significant(alpha) {
                "significantly"
            } else {
                "but not significantly"
            };
            format!(
                "Mean admissions in {first} are {direction} than in {second}, {verdict} \
                 (t = {:.3}, df = {:.1}, p = {} {} {alpha}).",
                t.t,
                t.df,
                format_p(t.p_value),
                relation(t.p_value, alpha)
            )
        }
        Outcome::Failed { reason } => {
            format!("The t-test of {first} vs {second} could not be computed: {reason}.")
        }
    }
}

/// Every reading, in report order.
#[must_use]
pub fn interpret(
    model: &ModelFit,
    checks: &Assumptions,
    posthoc_families: &[Posthoc],
    t_tests: &[PairwiseTest],
    alpha: f64,
) -> Vec<String> {
    let mut sentences = assumptions(checks, alpha);
    sentences.extend(
        [Term::FactorA, Term::FactorB, Term::Interaction]
            .into_iter()
            .filter_map(|term| anova_term(model, term, alpha)),
    );
    sentences.extend(posthoc_families.iter().map(|family| posthoc(family, alpha)));
    sentences.extend(t_tests.iter().map(|test| t_test(test, alpha)));
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AnalysisConfig, label::Season, pairwise, posthoc as tukey, testdata};

    fn model() -> ModelFit {
        model::fit(testdata::dataset().observations()).unwrap()
    }

    #[test]
    fn test_format_p() {
        assert_eq!(format_p(0.583_74), "0.5837");
        assert_eq!(format_p(1e-4), "0.0001");
        assert_eq!(format_p(9.9e-5), "< 0.0001");
    }

    #[test]
    fn test_anova_sentences() {
        let model = model();
        assert_eq!(
            anova_term(&model, Term::FactorB, 0.05).unwrap(),
            "Season has a significant effect on admissions (p = 0.0097 < 0.05)."
        );
        assert_eq!(
            anova_term(&model, Term::FactorA, 0.05).unwrap(),
            "Moon has no significant effect on admissions (p = 0.2604 ≥ 0.05)."
        );
        assert!(
            anova_term(&model, Term::Interaction, 0.05)
                .unwrap()
                .starts_with("The interaction between Moon and Season has no significant")
        );
        assert_eq!(anova_term(&model, Term::Residual, 0.05), None);
    }

    #[test]
    fn test_posthoc_sentence_lists_pairs() {
        let model = model();
        let families = tukey::compare(&model, &AnalysisConfig::default());
        let season = posthoc(&families[1], 0.05);
        assert!(season.contains("Spring-Winter"), "{season}");
        assert!(season.contains("Fall-Spring"), "{season}");
        assert_eq!(
            posthoc(&families[0], 0.05),
            "No pair of Moon levels differs significantly at alpha = 0.05."
        );
    }

    #[test]
    fn test_t_test_sentence() {
        let dataset = testdata::dataset();
        let tests = pairwise::test_all(dataset.observations(), &AnalysisConfig::default());
        assert_eq!(tests[0].first, Season::Fall);
        let sentence = t_test(&tests[0], 0.05);
        assert!(sentence.starts_with("Mean admissions in Fall are lower than in Spring, significantly"));
        assert!(sentence.contains("df = 16.0"), "{sentence}");
        assert!(sentence.contains("p = 0.0011 < 0.05"), "{sentence}");
    }

    #[test]
    fn test_failed_outcome_is_named() {
        let failed = PairwiseTest {
            first: Season::Winter,
            second: Season::Summer,
            outcome: Outcome::Failed {
                reason: "too few".to_owned(),
            },
        };
        assert_eq!(
            t_test(&failed, 0.05),
            "The t-test of Winter vs Summer could not be computed: too few."
        );
    }
}
