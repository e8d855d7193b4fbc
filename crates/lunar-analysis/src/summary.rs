//! Descriptive summaries behind the report's figures.
//!
//! Boxplots are represented by five-number summaries per group, and the
//! per-season histograms share one range so their bars are comparable.

use std::collections::BTreeMap;

use lunar_stats::{descriptive::DescriptiveStats, histogram::Histogram};
use serde::Serialize;

use crate::{
    grouping,
    label::{Month, MoonPhase, Season},
    observation::{self, Observation},
};

/// Descriptive statistics of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary<K> {
    pub level: K,
    pub stats: DescriptiveStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonHistogram {
    pub season: Season,
    pub histogram: Histogram,
}

/// Data for every figure of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figures {
    pub by_moon: Vec<GroupSummary<MoonPhase>>,
    pub by_month: Vec<GroupSummary<Month>>,
    pub by_season: Vec<GroupSummary<Season>>,
    pub season_histograms: Vec<SeasonHistogram>,
}

impl Figures {
    #[must_use]
    pub fn new(observations: &[Observation], histogram_bins: usize) -> Self {
        let seasons = grouping::by_season(observations);

        let all = observation::admissions(observations);
        let min = all.iter().copied().fold(f64::INFINITY, f64::min);
        let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let season_histograms = if all.is_empty() {
            vec![]
        } else {
            seasons
                .iter()
                .map(|(&season, group)| SeasonHistogram {
                    season,
                    histogram: Histogram::with_range(
                        group.iter().map(|o| o.admissions),
                        histogram_bins,
                        min..max,
                    ),
                })
                .collect()
        };

        Self {
            by_moon: summarize(&grouping::by_moon(observations)),
            by_month: summarize(&grouping::by_month(observations)),
            by_season: summarize(&seasons),
            season_histograms,
        }
    }
}

/// Summarizes each non-empty group, in key order.
pub fn summarize<K>(groups: &BTreeMap<K, Vec<Observation>>) -> Vec<GroupSummary<K>>
where
    K: Ord + Copy,
{
    groups
        .iter()
        .filter_map(|(&level, group)| {
            let stats = DescriptiveStats::new(group.iter().map(|o| o.admissions))?;
            Some(GroupSummary { level, stats })
        })
        .collect()
}
