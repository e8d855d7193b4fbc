//! Partitioning observations by factor levels.
//!
//! Groups are derived on demand and never stored alongside the dataset.
//! Keys are factor levels (or tuples of them), so the ordered map yields
//! groups in canonical level order: `Before, During, After` for the moon
//! phase, `Winter, Spring, Summer, Fall` for the season, and lexicographic
//! order for crossed factors.

use std::collections::BTreeMap;

use crate::{
    label::{Month, MoonPhase, Season},
    observation::Observation,
};

/// Groups observations by an arbitrary ordered key.
///
/// Observations keep their input order within each group.
///
/// # Examples
///
/// ```
/// use lunar_analysis::{
///     grouping,
///     label::{Month, MoonPhase, Season},
///     observation::Observation,
/// };
///
/// let observations = [
///     Observation::new(Month::Jan, MoonPhase::After, 4.0),
///     Observation::new(Month::Apr, MoonPhase::Before, 2.0),
///     Observation::new(Month::Feb, MoonPhase::Before, 3.0),
/// ];
/// let groups = grouping::group_by(&observations, |o| o.season);
/// assert_eq!(groups.keys().copied().collect::<Vec<_>>(), [Season::Winter, Season::Spring]);
/// assert_eq!(groups[&Season::Winter].len(), 2);
/// ```
pub fn group_by<K, F>(observations: &[Observation], key: F) -> BTreeMap<K, Vec<Observation>>
where
    K: Ord,
    F: Fn(&Observation) -> K,
{
    let mut groups = BTreeMap::<K, Vec<Observation>>::new();
    for obs in observations {
        groups.entry(key(obs)).or_default().push(*obs);
    }
    groups
}

#[must_use]
pub fn by_moon(observations: &[Observation]) -> BTreeMap<MoonPhase, Vec<Observation>> {
    group_by(observations, |o| o.moon)
}

#[must_use]
pub fn by_month(observations: &[Observation]) -> BTreeMap<Month, Vec<Observation>> {
    group_by(observations, |o| o.month)
}

#[must_use]
pub fn by_season(observations: &[Observation]) -> BTreeMap<Season, Vec<Observation>> {
    group_by(observations, |o| o.season)
}

/// The full `Moon × Season` cross used by the two-way model.
#[must_use]
pub fn by_moon_and_season(
    observations: &[Observation],
) -> BTreeMap<(MoonPhase, Season), Vec<Observation>> {
    group_by(observations, |o| (o.moon, o.season))
}
