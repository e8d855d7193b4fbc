//! Lunar-phase admissions analysis.
//!
//! Loads monthly admissions recorded before, during, and after the full moon,
//! labels each month with its season, and tests whether the moon phase, the
//! season, or their interaction explains the variation in admissions.
//!
//! # Pipeline
//!
//! 1. [`dataset`]: read and validate the 36-row table
//! 2. [`contingency`] and [`summary`]: descriptive tables and figure data
//! 3. [`model`]: two-way ANOVA `Admission ~ Moon * Season` (fatal on failure)
//! 4. [`assumptions`]: Levene and Shapiro–Wilk checks (advisory)
//! 5. [`posthoc`]: Tukey HSD per factor and for the interaction
//! 6. [`pairwise`]: two-sample t-tests between chosen seasons
//! 7. [`narrative`]: one sentence per result
//!
//! [`report::analyze`] runs every stage and collects the results into an
//! [`AnalysisReport`].
//!
//! # Examples
//!
//! ```no_run
//! use lunar_analysis::{AnalysisConfig, Dataset, report};
//!
//! let dataset = Dataset::from_path("data/moon_admissions.csv")?;
//! let report = report::analyze(&dataset, &AnalysisConfig::default())?;
//! for sentence in &report.narrative {
//!     println!("{sentence}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assumptions;
pub mod config;
pub mod contingency;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod label;
pub mod model;
pub mod narrative;
pub mod observation;
pub mod outcome;
pub mod pairwise;
pub mod posthoc;
pub mod report;
pub mod summary;

#[cfg(test)]
mod testdata;

pub use self::{
    config::AnalysisConfig,
    dataset::{Dataset, DatasetError},
    error::AnalysisError,
    label::{Label, Month, MoonPhase, ParseLabelError, Season},
    observation::Observation,
    outcome::{Outcome, Verdict},
    report::AnalysisReport,
};
