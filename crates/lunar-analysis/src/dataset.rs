//! Loading and validating the admissions table.
//!
//! The input is a delimited file with a header row and three columns:
//!
//! ```text
//! Month,Moon,Admission
//! Aug,Before,6.4
//! Aug,During,5.0
//! ...
//! ```
//!
//! `Admission` is a rate, not a count: any finite non-negative number is
//! accepted, so fractional values such as `6.4` load as-is.
//!
//! A valid table holds exactly one observation for every `(month, moon
//! phase)` pair, 36 rows in total. Row order is free and is preserved.

use std::{
    collections::BTreeSet,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    label::{Label, Month, MoonPhase, ParseLabelError, Season},
    observation::Observation,
};

/// Number of observations in a complete table.
pub const EXPECTED_ROWS: usize = Month::ALL.len() * MoonPhase::ALL.len();

/// Errors raised while loading the admissions table.
///
/// Row numbers are 1-based and count data rows only (the header is not a row).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to open {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("row {row}: {source}")]
    Csv { row: usize, source: csv::Error },
    #[display("row {row}: {source}")]
    Label { row: usize, source: ParseLabelError },
    #[display("row {row}: admission must be a non-negative finite number, got {value}")]
    InvalidAdmission { row: usize, value: f64 },
    #[display("row {row}: {month} belongs to {expected}, not {season}")]
    SeasonMismatch {
        row: usize,
        month: Month,
        season: Season,
        expected: Season,
    },
    #[display("row {row}: duplicate observation for {month}/{moon}")]
    Duplicate {
        row: usize,
        month: Month,
        moon: MoonPhase,
    },
    #[display(
        "no observation for {month}/{moon} ({rows} rows read, {} expected)",
        EXPECTED_ROWS
    )]
    Missing {
        month: Month,
        moon: MoonPhase,
        rows: usize,
    },
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Month", alias = "month")]
    month: String,
    #[serde(rename = "Moon", alias = "moon")]
    moon: String,
    #[serde(rename = "Admission", alias = "admission")]
    admission: f64,
}

/// A validated, complete set of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Reads and validates the table stored at `path`.
    pub fn from_path<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_owned(),
            source,
        })?;
        let dataset = Self::from_reader(io::BufReader::new(file))?;
        info!(path = %path.display(), rows = dataset.len(), "loaded admissions table");
        Ok(dataset)
    }

    /// Reads and validates a table from any reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use lunar_analysis::dataset::{Dataset, DatasetError};
    ///
    /// let csv = "Month,Moon,Admission\nJan,Full,3.0\n";
    /// let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
    /// assert!(matches!(err, DatasetError::Label { row: 1, .. }));
    /// ```
    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut observations = Vec::with_capacity(EXPECTED_ROWS);
        for (i, record) in reader.deserialize::<Record>().enumerate() {
            let row = i + 1;
            let record = record.map_err(|source| DatasetError::Csv { row, source })?;
            let month = Month::parse_label(&record.month)
                .map_err(|source| DatasetError::Label { row, source })?;
            let moon = MoonPhase::parse_label(&record.moon)
                .map_err(|source| DatasetError::Label { row, source })?;
            observations.push(Observation::new(month, moon, record.admission));
        }
        debug!(rows = observations.len(), "parsed admissions table");

        Self::from_observations(observations)
    }

    /// Validates observations built in memory.
    ///
    /// Each observation's season must be the one its month maps to.
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self, DatasetError> {
        let mut seen = BTreeSet::new();
        for (i, obs) in observations.iter().enumerate() {
            let row = i + 1;
            if !(obs.admissions.is_finite() && obs.admissions >= 0.0) {
                return Err(DatasetError::InvalidAdmission {
                    row,
                    value: obs.admissions,
                });
            }
            let expected = obs.month.season();
            if obs.season != expected {
                return Err(DatasetError::SeasonMismatch {
                    row,
                    month: obs.month,
                    season: obs.season,
                    expected,
                });
            }
            if !seen.insert((obs.month, obs.moon)) {
                return Err(DatasetError::Duplicate {
                    row,
                    month: obs.month,
                    moon: obs.moon,
                });
            }
        }

        for &month in Month::ALL {
            for &moon in MoonPhase::ALL {
                if !seen.contains(&(month, moon)) {
                    return Err(DatasetError::Missing {
                        month,
                        moon,
                        rows: observations.len(),
                    });
                }
            }
        }

        Ok(Self { observations })
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata;

    #[test]
    fn test_bundled_table_is_valid() {
        let dataset = testdata::dataset();
        assert_eq!(dataset.len(), EXPECTED_ROWS);
        let first = dataset.observations()[0];
        assert_eq!(first.month, Month::Aug);
        assert_eq!(first.moon, MoonPhase::Before);
        assert_eq!(first.admissions, 6.4);
    }

    #[test]
    fn test_whitespace_and_lowercase_headers() {
        let mut csv = String::from("month , moon , admission\n");
        for line in testdata::CSV.lines().skip(1) {
            csv.push_str(&line.replace(',', " , "));
            csv.push('\n');
        }
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset, testdata::dataset());
    }

    #[test]
    fn test_missing_row() {
        let csv = testdata::CSV.lines().take(36).collect::<Vec<_>>().join("\n");
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Missing {
                month: Month::Jul,
                moon: MoonPhase::After,
                rows: 35
            }
        ));
        assert_eq!(
            err.to_string(),
            "no observation for Jul/After (35 rows read, 36 expected)"
        );
    }

    #[test]
    fn test_duplicate_row() {
        let csv = format!("{}Aug,During,4.2\n", testdata::CSV);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Duplicate {
                row: 37,
                month: Month::Aug,
                moon: MoonPhase::During
            }
        ));
    }

    #[test]
    fn test_unknown_month() {
        let csv = testdata::CSV.replacen("Sep,", "Sept,", 1);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::Label { row, source } => {
                assert_eq!(row, 4);
                assert_eq!(source.kind, "month");
                assert_eq!(source.text, "Sept");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_admission() {
        let csv = testdata::CSV.replacen("6.4", "-6.4", 1);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidAdmission { row: 1, .. }));
    }

    #[test]
    fn test_season_must_follow_month() {
        let mut observations = testdata::dataset().observations().to_vec();
        observations[0].season = Season::Winter;
        let err = Dataset::from_observations(observations).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::SeasonMismatch {
                row: 1,
                month: Month::Aug,
                season: Season::Winter,
                expected: Season::Summer,
            }
        ));
        assert_eq!(err.to_string(), "row 1: Aug belongs to Summer, not Winter");
    }

    #[test]
    fn test_missing_column() {
        let csv = "Month,Admission\nJan,3.0\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { row: 1, .. }));
    }

    #[test]
    fn test_non_numeric_admission() {
        let csv = testdata::CSV.replacen("6.4", "NA", 1);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { row: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().starts_with("failed to open does/not/exist.csv"));
    }
}
