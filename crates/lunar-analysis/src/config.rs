//! Tunable parameters of the analysis.
//!
//! The configuration is plain data (serde, usually JSON). Missing fields take
//! their defaults, so an empty object is a valid configuration:
//!
//! ```json
//! {
//!   "alpha": 0.05,
//!   "confidence_level": 0.95,
//!   "levene_center": "median",
//!   "interaction_posthoc": true,
//!   "t_tests": [
//!     { "first": "Fall", "second": "Spring" },
//!     { "first": "Winter", "second": "Spring" }
//!   ],
//!   "equal_variance": true,
//!   "histogram_bins": 6
//! }
//! ```

use lunar_stats::{levene::LeveneCenter, t_test::VarianceAssumption};
use serde::{Deserialize, Serialize};

use crate::label::Season;

/// Largest accepted number of histogram bins.
pub const MAX_HISTOGRAM_BINS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Significance threshold applied when interpreting p-values.
    pub alpha: f64,
    /// Confidence of Tukey's simultaneous intervals and the t-test intervals.
    pub confidence_level: f64,
    pub levene_center: LeveneCenter,
    /// Also compare all `Moon × Season` cells with Tukey's HSD.
    pub interaction_posthoc: bool,
    /// Season pairs compared with two-sample t-tests.
    pub t_tests: Vec<SeasonPair>,
    /// Pool the variances in t-tests; Welch's test otherwise.
    pub equal_variance: bool,
    /// Number of bins of the per-season histograms.
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            confidence_level: 0.95,
            levene_center: LeveneCenter::Median,
            interaction_posthoc: true,
            t_tests: vec![
                SeasonPair::new(Season::Fall, Season::Spring),
                SeasonPair::new(Season::Winter, Season::Spring),
            ],
            equal_variance: true,
            histogram_bins: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPair {
    pub first: Season,
    pub second: Season,
}

impl SeasonPair {
    #[must_use]
    pub fn new(first: Season, second: Season) -> Self {
        Self { first, second }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("alpha must lie strictly between 0 and 1, got {value}")]
    Alpha { value: f64 },
    #[display("confidence level must lie strictly between 0 and 1, got {value}")]
    ConfidenceLevel { value: f64 },
    #[display("histogram bins must lie in 1..={}, got {value}", MAX_HISTOGRAM_BINS)]
    HistogramBins { value: usize },
    #[display("t-test compares {season} with itself")]
    SelfComparison { season: Season },
}

impl AnalysisConfig {
    /// Checks that every parameter lies in its domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use lunar_analysis::config::{AnalysisConfig, ConfigError};
    ///
    /// assert!(AnalysisConfig::default().validate().is_ok());
    ///
    /// let config = AnalysisConfig { alpha: 1.5, ..AnalysisConfig::default() };
    /// assert_eq!(config.validate(), Err(ConfigError::Alpha { value: 1.5 }));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::Alpha { value: self.alpha });
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::ConfidenceLevel {
                value: self.confidence_level,
            });
        }
        if !(1..=MAX_HISTOGRAM_BINS).contains(&self.histogram_bins) {
            return Err(ConfigError::HistogramBins {
                value: self.histogram_bins,
            });
        }
        if let Some(pair) = self.t_tests.iter().find(|p| p.first == p.second) {
            return Err(ConfigError::SelfComparison {
                season: pair.first,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn variance_assumption(&self) -> VarianceAssumption {
        if self.equal_variance {
            VarianceAssumption::Equal
        } else {
            VarianceAssumption::Unequal
        }
    }
}
