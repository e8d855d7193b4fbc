use serde::Serialize;

use crate::label::{Month, MoonPhase, Season};

/// Admissions recorded for one month in one phase of the lunar cycle.
///
/// The season is derived from the month by [`Observation::new`].
/// [`Dataset`](crate::dataset::Dataset) rejects observations whose season
/// disagrees with their month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub month: Month,
    pub moon: MoonPhase,
    pub season: Season,
    /// Admission rate, a non-negative measurement.
    pub admissions: f64,
}

impl Observation {
    #[must_use]
    pub fn new(month: Month, moon: MoonPhase, admissions: f64) -> Self {
        Self {
            month,
            moon,
            season: month.season(),
            admissions,
        }
    }
}

/// Extracts the responses of a set of observations.
#[must_use]
pub fn admissions(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.admissions).collect()
}
