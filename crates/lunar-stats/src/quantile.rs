/// Computes a sample quantile from sorted data.
///
/// Uses linear interpolation between order statistics (Hyndman & Fan type 7):
/// the quantile at probability `p` sits at zero-based position `(n - 1) * p`.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `p` - The probability, clamped to `[0, 1]`
///
/// # Returns
///
/// The interpolated quantile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use lunar_stats::quantile::quantile_sorted;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&values, 0.5), 2.5);
/// assert_eq!(quantile_sorted(&values, 0.0), 1.0);
/// assert_eq!(quantile_sorted(&values, 1.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let p = p.clamp(0.0, 1.0);
    let position = (sorted_values.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    if lower + 1 >= sorted_values.len() {
        return last;
    }
    let frac = position - position.floor();
    let base = sorted_values[lower];
    base + frac * (sorted_values[lower + 1] - base)
}
