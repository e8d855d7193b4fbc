//! Per-test results that may individually fail.

use lunar_stats::StatsResult;
use serde::Serialize;
use tracing::warn;

/// Result of one test within the report.
///
/// A degenerate input makes a single test undefined without invalidating the
/// rest of the report, so the failure is kept and rendered next to the
/// results that did complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum Outcome<T> {
    Completed(T),
    Failed { reason: String },
}

impl<T> Outcome<T> {
    /// Wraps a statistical result, logging a failure under `test`.
    pub fn record(test: &str, result: StatsResult<T>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(e) => {
                warn!(test, error = %e, "test could not be computed");
                Self::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

/// Reading of an assumption check at the configured significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No evidence against the assumption.
    Satisfied,
    /// The p-value fell below alpha.
    Violated,
}

impl Verdict {
    #[must_use]
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Self::Violated
        } else {
            Self::Satisfied
        }
    }
}

#[cfg(test)]
mod tests {
    use lunar_stats::StatsError;

    use super::*;

    #[test]
    fn test_failure_keeps_reason() {
        let outcome = Outcome::<f64>::record("demo", Err(StatsError::ZeroVariance));
        assert_eq!(
            outcome,
            Outcome::Failed {
                reason: "all values are identical; variance is zero".to_owned()
            }
        );
        assert!(outcome.completed().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let done = serde_json::to_value(Outcome::Completed(1.5)).unwrap();
        assert_eq!(done, serde_json::json!({ "status": "completed", "result": 1.5 }));
        let failed = serde_json::to_value(Outcome::<f64>::Failed {
            reason: "nope".to_owned(),
        })
        .unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "status": "failed", "result": { "reason": "nope" } })
        );
    }

    #[test]
    fn test_verdict_threshold() {
        assert_eq!(Verdict::from_p_value(0.01, 0.05), Verdict::Violated);
        assert_eq!(Verdict::from_p_value(0.05, 0.05), Verdict::Satisfied);
    }
}
