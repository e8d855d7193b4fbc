//! Categorical factor levels and the month-to-season labeler.
//!
//! Every factor is an enum whose declaration order is its canonical level
//! order. The derived `Ord` follows that order, so any ordered collection
//! keyed by these types (see [`grouping`](crate::grouping)) presents groups
//! the way report tables and figures expect them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A categorical factor level.
pub trait Label: Copy + Ord + fmt::Display + FromStr + 'static {
    /// Human-readable name of the factor, e.g. `"month"`.
    const KIND: &'static str;

    /// All levels in canonical order.
    const ALL: &'static [Self];

    /// Position of this level in [`ALL`](Self::ALL).
    fn index(self) -> usize;

    /// Parses a label, ignoring surrounding whitespace and letter case.
    fn parse_label(text: &str) -> Result<Self, ParseLabelError> {
        text.trim()
            .parse()
            .map_err(|_| ParseLabelError::new(Self::KIND, text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unrecognized {kind} label `{text}`")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub text: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, text: &str) -> Self {
        Self {
            kind,
            text: text.to_owned(),
        }
    }
}

/// Calendar month, written with its three-letter abbreviation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Label for Month {
    const KIND: &'static str = "month";
    const ALL: &'static [Self] = &[
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl Month {
    /// The season this month belongs to.
    #[must_use]
    pub fn season(self) -> Season {
        season(self)
    }
}

/// Timing of an observation relative to the full moon.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum MoonPhase {
    Before,
    During,
    After,
}

impl Label for MoonPhase {
    const KIND: &'static str = "moon phase";
    const ALL: &'static [Self] = &[Self::Before, Self::During, Self::After];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Label for Season {
    const KIND: &'static str = "season";
    const ALL: &'static [Self] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    fn index(self) -> usize {
        self as usize
    }
}

impl Season {
    /// The months of this season, in calendar order.
    #[must_use]
    pub fn months(self) -> impl Iterator<Item = Month> {
        Month::ALL.iter().copied().filter(move |m| season(*m) == self)
    }
}

/// Maps a month to its meteorological season (Northern Hemisphere).
///
/// # Examples
///
/// ```
/// use lunar_analysis::label::{self, Month, Season};
///
/// assert_eq!(label::season(Month::Dec), Season::Winter);
/// assert_eq!(label::season(Month::Apr), Season::Spring);
/// ```
#[must_use]
pub fn season(month: Month) -> Season {
    match month {
        Month::Dec | Month::Jan | Month::Feb => Season::Winter,
        Month::Mar | Month::Apr | Month::May => Season::Spring,
        Month::Jun | Month::Jul | Month::Aug => Season::Summer,
        Month::Sep | Month::Oct | Month::Nov => Season::Fall,
    }
}

/// Maps a month label to its season, rejecting unrecognized labels.
///
/// # Examples
///
/// ```
/// use lunar_analysis::label::{self, Season};
///
/// assert_eq!(label::season_of("oct"), Ok(Season::Fall));
/// assert!(label::season_of("Smarch").is_err());
/// ```
pub fn season_of(month: &str) -> Result<Season, ParseLabelError> {
    Month::parse_label(month).map(season)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_each_season_has_three_months() {
        for &s in Season::ALL {
            assert_eq!(s.months().count(), 3, "{s}");
        }
        assert_eq!(
            Season::Winter.months().collect::<Vec<_>>(),
            vec![Month::Jan, Month::Feb, Month::Dec]
        );
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for &m in Month::ALL {
            assert_eq!(Month::parse_label(&m.to_string()), Ok(m));
        }
        for &p in MoonPhase::ALL {
            assert_eq!(MoonPhase::parse_label(&p.to_string()), Ok(p));
        }
        for &s in Season::ALL {
            assert_eq!(Season::parse_label(&s.to_string()), Ok(s));
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(Month::parse_label(" sep "), Ok(Month::Sep));
        assert_eq!(MoonPhase::parse_label("DURING"), Ok(MoonPhase::During));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        let err = MoonPhase::parse_label("Waxing").unwrap_err();
        assert_eq!(err.kind, "moon phase");
        assert_eq!(err.text, "Waxing");
        assert_eq!(err.to_string(), "unrecognized moon phase label `Waxing`");
        assert!(Month::parse_label("September").is_err());
        assert!(season_of("").is_err());
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, &m) in Month::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
        assert!(MoonPhase::Before < MoonPhase::During);
        assert!(MoonPhase::During < MoonPhase::After);
        assert!(Season::Winter < Season::Fall);
    }

    proptest! {
        #[test]
        fn prop_season_is_total_and_deterministic(i in 0_usize..12) {
            let month = Month::ALL[i];
            let s = season(month);
            prop_assert!(Season::ALL.contains(&s));
            prop_assert_eq!(s, season(month));
            prop_assert_eq!(season_of(&month.to_string()), Ok(s));
            prop_assert!(s.months().any(|m| m == month));
        }
    }
}
