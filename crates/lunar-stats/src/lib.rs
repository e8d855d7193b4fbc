//! Statistical procedures for small factorial designs.
//!
//! This crate knows nothing about the domain it is applied to. It works on
//! plain `f64` samples and level indices, and provides:
//!
//! - **Descriptive statistics**: mean, variance, quartiles and five-number summaries
//! - **Histograms**: equal-width binning over a shared range
//! - **Distributions**: Student's t, F and studentized range
//! - **Two-way ANOVA**: sum-of-squares decomposition with interaction
//! - **Assumption checks**: Levene / Brown–Forsythe and Shapiro–Wilk
//! - **Post-hoc and pairwise tests**: Tukey HSD and two-sample t-tests
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`quantile`]: Linear-interpolated sample quantiles
//! - [`histogram`]: Histogram construction for visualizing distributions
//! - [`distribution`]: Continuous distributions turning statistics into p-values
//! - [`anova`]: Two-way analysis of variance
//! - [`levene`]: Homogeneity of variance across groups
//! - [`shapiro_wilk`]: Normality of a sample
//! - [`tukey`]: Tukey's honestly significant difference
//! - [`t_test`]: Two-sample t-tests (pooled and Welch)
//!
//! # Examples
//!
//! ## Fitting a two-way ANOVA
//!
//! ```
//! use lunar_stats::anova::{TwoWayAnova, TwoWayLayout};
//!
//! let mut layout = TwoWayLayout::new(2, 2);
//! for (a, b, y) in [
//!     (0, 0, 1.0), (0, 0, 2.0),
//!     (0, 1, 3.0), (0, 1, 4.0),
//!     (1, 0, 5.0), (1, 0, 6.0),
//!     (1, 1, 8.0), (1, 1, 9.0),
//! ] {
//!     layout.push(a, b, y);
//! }
//! let fit = TwoWayAnova::fit(&layout).unwrap();
//! assert_eq!(fit.table.residual.df, 4.0);
//! ```
//!
//! ## Comparing two samples
//!
//! ```
//! use lunar_stats::t_test::TTest;
//!
//! let result = TTest::pooled(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], 0.95).unwrap();
//! assert_eq!(result.df, 4.0);
//! assert!(result.p_value < 0.05);
//! ```

pub mod anova;
pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod histogram;
pub mod levene;
pub mod quantile;
pub mod shapiro_wilk;
pub mod special;
pub mod tukey;

#[cfg(test)]
mod fixtures;

pub use self::error::{StatsError, StatsResult};
