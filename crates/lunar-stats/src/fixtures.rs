//! Shared test data: monthly mental-health admission rates around the full
//! moon (Blackman & Catalina), laid out as `(phase, season, admissions)`.
//!
//! Phases: 0 = Before, 1 = During, 2 = After.
//! Seasons: 0 = Winter, 1 = Spring, 2 = Summer, 3 = Fall.

use crate::anova::TwoWayLayout;

/// `(season, [before, during, after])` per month, August to July.
const MONTHS: [(usize, [f64; 3]); 12] = [
    (2, [6.4, 5.0, 5.8]),
    (3, [7.1, 13.0, 9.2]),
    (3, [6.5, 14.0, 7.9]),
    (3, [8.6, 12.0, 7.7]),
    (0, [8.1, 6.0, 11.0]),
    (0, [10.4, 9.0, 12.9]),
    (0, [11.5, 13.0, 13.5]),
    (1, [13.8, 16.0, 13.1]),
    (1, [15.4, 25.0, 15.8]),
    (1, [15.7, 13.0, 13.3]),
    (2, [11.7, 14.0, 12.8]),
    (2, [15.8, 20.0, 14.5]),
];

pub(crate) fn observations() -> Vec<(usize, usize, f64)> {
    MONTHS
        .iter()
        .flat_map(|&(season, values)| {
            values
                .into_iter()
                .enumerate()
                .map(move |(phase, y)| (phase, season, y))
        })
        .collect()
}

pub(crate) fn layout() -> TwoWayLayout {
    let mut layout = TwoWayLayout::new(3, 4);
    for (phase, season, y) in observations() {
        layout.push(phase, season, y);
    }
    layout
}

pub(crate) fn season(index: usize) -> Vec<f64> {
    observations()
        .into_iter()
        .filter(|&(_, season, _)| season == index)
        .map(|(_, _, y)| y)
        .collect()
}

/// The twelve phase × season groups.
pub(crate) fn cells() -> Vec<Vec<f64>> {
    let mut cells = vec![vec![]; 12];
    for (phase, season, y) in observations() {
        cells[phase * 4 + season].push(y);
    }
    cells
}
