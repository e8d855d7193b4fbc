/// Errors raised by the statistical procedures of this crate.
///
/// Every variant describes input that makes a procedure undefined. None of
/// them is recoverable by retrying with the same data.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// Fewer observations than the procedure needs.
    #[display("insufficient sample: need at least {required} observations, got {actual}")]
    InsufficientSample { required: usize, actual: usize },
    /// More observations than the procedure's approximation supports.
    #[display("sample too large: at most {limit} observations supported, got {actual}")]
    SampleTooLarge { limit: usize, actual: usize },
    /// The grouping or factorial layout leaves the model undefined.
    #[display("degenerate design: {reason}")]
    DegenerateDesign { reason: String },
    /// All observations are identical, so no dispersion is available.
    #[display("all values are identical; variance is zero")]
    ZeroVariance,
    /// A parameter lies outside its domain.
    #[display("invalid parameter `{name}` = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// The input contains NaN or infinite values.
    #[display("input contains non-finite values")]
    NonFiniteValue,
}

impl StatsError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateDesign {
            reason: reason.into(),
        }
    }
}

pub type StatsResult<T> = Result<T, StatsError>;

pub(crate) fn ensure_finite(values: &[f64]) -> StatsResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(StatsError::NonFiniteValue)
    }
}

pub(crate) fn ensure_probability(name: &'static str, value: f64) -> StatsResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidParameter { name, value })
    }
}
