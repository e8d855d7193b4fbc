//! The bundled admissions table, for unit tests.

use crate::dataset::Dataset;

pub(crate) const CSV: &str = include_str!("../../../data/moon_admissions.csv");

pub(crate) fn dataset() -> Dataset {
    Dataset::from_reader(CSV.as_bytes()).unwrap()
}
