use lunar_stats::StatsError;

use crate::config::ConfigError;

/// Errors that abort the analysis.
///
/// Only stages every later stage depends on fail this way. Failures of the
/// assumption checks and the individual comparisons are recorded in the
/// report as [`Outcome::Failed`](crate::outcome::Outcome::Failed) instead.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("invalid configuration: {source}")]
    Config { source: ConfigError },
    #[display("{stage} failed: {source}")]
    Stats {
        stage: &'static str,
        source: StatsError,
    },
}
