use serde::Serialize;

use crate::{
    label::{Label, MoonPhase, Season},
    observation::Observation,
};

/// Two-way table of summed admissions with margins.
///
/// Every level of both factors gets a row or column, even when no
/// observation falls into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyTable<R, C> {
    pub rows: Vec<R>,
    pub columns: Vec<C>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<f64>>,
    pub row_totals: Vec<f64>,
    pub column_totals: Vec<f64>,
    pub grand_total: f64,
}

impl<R, C> ContingencyTable<R, C>
where
    R: Label,
    C: Label,
{
    /// Sums admissions over every `(row, column)` pair of levels.
    pub fn summed<FR, FC>(observations: &[Observation], row_of: FR, column_of: FC) -> Self
    where
        FR: Fn(&Observation) -> R,
        FC: Fn(&Observation) -> C,
    {
        let mut cells = vec![vec![0.0; C::ALL.len()]; R::ALL.len()];
        for obs in observations {
            cells[row_of(obs).index()][column_of(obs).index()] += obs.admissions;
        }
        let row_totals = cells.iter().map(|row| row.iter().sum()).collect::<Vec<f64>>();
        let column_totals = (0..C::ALL.len())
            .map(|j| cells.iter().map(|row| row[j]).sum())
            .collect::<Vec<f64>>();
        let grand_total = row_totals.iter().sum();

        Self {
            rows: R::ALL.to_vec(),
            columns: C::ALL.to_vec(),
            cells,
            row_totals,
            column_totals,
            grand_total,
        }
    }

    #[must_use]
    pub fn get(&self, row: R, column: C) -> f64 {
        self.cells[row.index()][column.index()]
    }
}

/// `Season × Moon` table of summed admissions.
///
/// # Examples
///
/// ```
/// use lunar_analysis::{
///     contingency,
///     label::{Month, MoonPhase, Season},
///     observation::Observation,
/// };
///
/// let observations = [
///     Observation::new(Month::Mar, MoonPhase::During, 16.0),
///     Observation::new(Month::Apr, MoonPhase::During, 25.0),
///     Observation::new(Month::Apr, MoonPhase::After, 15.5),
/// ];
/// let table = contingency::season_by_moon(&observations);
/// assert_eq!(table.get(Season::Spring, MoonPhase::During), 41.0);
/// assert_eq!(table.get(Season::Winter, MoonPhase::During), 0.0);
/// assert_eq!(table.grand_total, 56.5);
/// ```
#[must_use]
pub fn season_by_moon(observations: &[Observation]) -> ContingencyTable<Season, MoonPhase> {
    ContingencyTable::summed(observations, |o| o.season, |o| o.moon)
}
