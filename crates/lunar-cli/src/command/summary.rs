//! Descriptive tables for a quick look at the admissions table.

use std::{fmt::Display, path::PathBuf};

use clap::Args;
use lunar_analysis::{
    AnalysisConfig, Label, contingency,
    summary::{Figures, GroupSummary},
};

use crate::{markdown, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    /// Path to the admissions CSV file (`Month,Moon,Admission`)
    pub data: PathBuf,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.data)?;
    let observations = dataset.observations();
    let figures = Figures::new(observations, AnalysisConfig::default().histogram_bins);

    println!("Admissions Summary ({} observations)", observations.len());
    println!("=====================================\n");

    print_legend();
    println!();

    println!("By Moon phase:");
    print_group_table("Moon", &figures.by_moon);
    println!();

    println!("By Season:");
    print_group_table("Season", &figures.by_season);
    println!();

    println!("By Month:");
    print_group_table("Month", &figures.by_month);
    println!();

    println!("Summed admissions, Season x Moon:");
    print_contingency(&contingency::season_by_moon(observations));
    println!();

    println!("Histograms by Season:");
    for h in &figures.season_histograms {
        println!("  {}", h.season);
        for line in markdown::histogram_lines(&h.histogram) {
            println!("    {line}");
        }
    }

    Ok(())
}

fn print_legend() {
    println!("Legend:");
    println!("  N      : Number of observations");
    println!("  SD     : Sample standard deviation (n - 1)");
    println!("  Q1, Q3 : Quartiles (linear interpolation)");
}

fn print_group_table<K>(label_col: &str, groups: &[GroupSummary<K>])
where
    K: Display,
{
    println!(
        "  {:<8} {:>4} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        label_col, "N", "Mean", "SD", "Min", "Q1", "Median", "Q3", "Max",
    );
    // label(8) + n(4) + 7 * value(8) + spaces(8)
    println!("  {}", "-".repeat(76));
    for group in groups {
        let stats = &group.stats;
        let sd = stats.std_dev.map_or("N/A".to_string(), |sd| format!("{sd:.2}"));
        println!(
            "  {:<8} {:>4} {:>8.2} {:>8} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            group.level.to_string(),
            stats.count,
            stats.mean,
            sd,
            stats.min,
            stats.q1,
            stats.median,
            stats.q3,
            stats.max,
        );
    }
}

fn print_contingency<R, C>(table: &contingency::ContingencyTable<R, C>)
where
    R: Label,
    C: Label,
{
    print!("  {:<8}", "");
    for column in &table.columns {
        print!(" {:>8}", column.to_string());
    }
    println!(" {:>8}", "Total");
    println!("  {}", "-".repeat(8 + 9 * (table.columns.len() + 1)));
    for (row, (cells, total)) in table
        .rows
        .iter()
        .zip(table.cells.iter().zip(&table.row_totals))
    {
        print!("  {:<8}", row.to_string());
        for cell in cells {
            print!(" {cell:>8.1}");
        }
        println!(" {total:>8.1}");
    }
    print!("  {:<8}", "Total");
    for total in &table.column_totals {
        print!(" {total:>8.1}");
    }
    println!(" {:>8.1}", table.grand_total);
}
