use serde::Serialize;

use crate::quantile;

/// Descriptive statistics summarizing a sample.
///
/// Dispersion uses the unbiased (`n - 1`) estimator, matching what the
/// inferential procedures of this crate assume. The quartiles make up the
/// five-number summary drawn by a boxplot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// Sum of all observations.
    pub sum: f64,
    /// The minimum value in the sample.
    pub min: f64,
    /// The first quartile (25th percentile, linear interpolation).
    pub q1: f64,
    /// The median of the sample.
    pub median: f64,
    /// The third quartile (75th percentile, linear interpolation).
    pub q3: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// Sample variance; `None` for a single observation.
    pub variance: Option<f64>,
    /// Sample standard deviation; `None` for a single observation.
    pub std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use lunar_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, Some(2.5));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let sum = sorted_values.iter().sum::<f64>();
        let mean = sum / count as f64;
        let variance = sample_variance(sorted_values, mean);

        Some(Self {
            count,
            sum,
            min,
            q1: quantile::quantile_sorted(sorted_values, 0.25),
            median: quantile::quantile_sorted(sorted_values, 0.5),
            q3: quantile::quantile_sorted(sorted_values, 0.75),
            max,
            mean,
            variance,
            std_dev: variance.map(f64::sqrt),
        })
    }

    /// Interquartile range `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Arithmetic mean, or `None` for an empty slice.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Unbiased sample variance around a known mean, or `None` below two values.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(ss / (values.len() - 1) as f64)
}

/// Median of unsorted values, or `None` for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile::quantile_sorted(&sorted, 0.5))
}
