use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a sample's distribution.
///
/// The histogram divides a range into equal-width bins and counts the values
/// falling into each bin. Values outside the range are tallied separately so
/// several histograms can share one range (and stay visually comparable)
/// without losing observations silently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Number of values below the first bin.
    pub underflow: u64,
    /// Number of values above the last bin.
    pub overflow: u64,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end;
    /// the last bin also includes its end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram over an explicit range.
    ///
    /// Use this to give several groups identical bins. A range of zero width
    /// is widened to unit-width bins centered on its start.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lunar_stats::histogram::Histogram;
    /// let histogram = Histogram::with_range([0.5, 1.5, 7.0], 2, 0.0..2.0);
    /// assert_eq!(histogram.bins[0].count, 1);
    /// assert_eq!(histogram.bins[1].count, 1);
    /// assert_eq!(histogram.overflow, 1);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn with_range<I>(values: I, num_bins: usize, range: Range<f64>) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        if num_bins == 0 {
            return Self::empty();
        }

        let mut start = range.start;
        let mut width = (range.end - range.start) / num_bins as f64;
        if width < f64::EPSILON {
            // Concentrated at a single value
            width = 1.0;
            start -= 0.5 * width * num_bins as f64;
        }
        let end = start + width * num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                // Recompute each edge from the start to avoid accumulated error
                range: (start + width * i as f64)..(start + width * (i + 1) as f64),
                count: 0,
            })
            .collect::<Vec<_>>();
        let mut underflow = 0;
        let mut overflow = 0;

        for value in values {
            if value < start {
                underflow += 1;
            } else if value > end {
                overflow += 1;
            } else {
                let idx = (((value - start) / width).floor() as usize).min(num_bins - 1);
                bins[idx].count += 1;
            }
        }

        Self {
            bins,
            underflow,
            overflow,
        }
    }

    fn empty() -> Self {
        Self {
            bins: vec![],
            underflow: 0,
            overflow: 0,
        }
    }

    /// Total number of binned values, including underflow and overflow.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum::<u64>() + self.underflow + self.overflow
    }

    /// Largest bin count, used to scale rendered bars.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bins() {
        let histogram = Histogram::with_range([1.0, 2.0], 0, 1.0..2.0);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let histogram = Histogram::with_range([0.0, 1.0, 2.0, 3.0, 4.0], 4, 0.0..4.0);
        let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn test_single_value_gets_a_bin() {
        let histogram = Histogram::with_range([3.0, 3.0, 3.0], 1, 3.0..3.0);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].count, 3);
        assert!(histogram.bins[0].range.contains(&3.0));
    }

    #[test]
    fn test_shared_range_keeps_edges() {
        let histogram = Histogram::with_range([5.0, 13.0, 24.9], 4, 5.0..25.0);
        assert_eq!(histogram.bins[0].range, 5.0..10.0);
        assert_eq!(histogram.bins[3].range, 20.0..25.0);
        assert_eq!(histogram.total(), 3);
        assert_eq!(histogram.underflow + histogram.overflow, 0);
    }

    #[test]
    fn test_out_of_range_values_are_tallied() {
        let histogram = Histogram::with_range([-1.0, 0.5, 3.0], 2, 0.0..2.0);
        assert_eq!(histogram.underflow, 1);
        assert_eq!(histogram.overflow, 1);
        assert_eq!(histogram.max_count(), 1);
    }
}
