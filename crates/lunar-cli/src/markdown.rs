//! Markdown rendering of an [`AnalysisReport`].

use std::{
    fmt::Display,
    io::{self, Write},
};

use lunar_analysis::{
    AnalysisReport, Label, Month, MoonPhase, Outcome, Verdict,
    assumptions::AssumptionCheck,
    contingency::ContingencyTable,
    narrative::format_p,
    posthoc::Posthoc,
    summary::GroupSummary,
};
use lunar_stats::{histogram::Histogram, levene::LeveneResult, shapiro_wilk::ShapiroWilkResult};

/// Longest histogram bar, in characters.
const MAX_BAR: u64 = 40;

pub fn write_report<W>(w: &mut W, report: &AnalysisReport) -> io::Result<()>
where
    W: Write,
{
    let alpha = report.config.alpha;

    writeln!(w, "# Lunar Phase and Mental Health Admissions")?;
    writeln!(w)?;
    writeln!(
        w,
        "Admissions to a mental health clinic over {} months, recorded before, during, \
         and after the full moon. Significance level: {alpha}.",
        report.figures.by_month.len()
    )?;
    writeln!(w)?;

    writeln!(w, "## Data")?;
    writeln!(w)?;
    write_observations(w, report)?;
    writeln!(w)?;
    writeln!(w, "Summed admissions by Season and Moon phase:")?;
    writeln!(w)?;
    write_contingency(w, &report.contingency)?;
    writeln!(w)?;

    write_descriptive(w, report)?;

    writeln!(w, "## Assumption checks")?;
    writeln!(w)?;
    writeln!(w, "| Test | Statistic | df | p-value | Verdict |")?;
    writeln!(w, "|---|---:|---:|---:|---|")?;
    write_levene(w, &report.assumptions.homogeneity)?;
    write_shapiro(w, &report.assumptions.normality)?;
    writeln!(w)?;

    write_anova(w, report)?;

    writeln!(w, "## Tukey HSD")?;
    writeln!(w)?;
    for family in &report.posthoc {
        write_posthoc(w, family)?;
        writeln!(w)?;
    }

    write_t_tests(w, report)?;

    writeln!(w, "## Interpretation")?;
    writeln!(w)?;
    for sentence in &report.narrative {
        writeln!(w, "- {sentence}")?;
    }
    Ok(())
}

fn write_descriptive<W: Write>(w: &mut W, report: &AnalysisReport) -> io::Result<()> {
    writeln!(w, "## Descriptive statistics")?;
    writeln!(w)?;
    writeln!(w, "### By Moon phase")?;
    writeln!(w)?;
    write_groups(w, "Moon", &report.figures.by_moon)?;
    writeln!(w)?;
    writeln!(w, "### By Season")?;
    writeln!(w)?;
    write_groups(w, "Season", &report.figures.by_season)?;
    writeln!(w)?;
    writeln!(w, "### By Month")?;
    writeln!(w)?;
    write_groups(w, "Month", &report.figures.by_month)?;
    writeln!(w)?;

    writeln!(w, "### Histograms by Season")?;
    writeln!(w)?;
    writeln!(w, "```text")?;
    for h in &report.figures.season_histograms {
        writeln!(w, "{}", h.season)?;
        for line in histogram_lines(&h.histogram) {
            writeln!(w, "  {line}")?;
        }
    }
    writeln!(w, "```")?;
    writeln!(w)?;
    Ok(())
}

fn write_anova<W: Write>(w: &mut W, report: &AnalysisReport) -> io::Result<()> {
    writeln!(w, "## Two-way ANOVA")?;
    writeln!(w)?;
    writeln!(w, "Model: `Admission ~ Moon * Season`")?;
    writeln!(w)?;
    writeln!(w, "| Term | Df | Sum Sq | Mean Sq | F value | Pr(>F) |")?;
    writeln!(w, "|---|---:|---:|---:|---:|---:|")?;
    for t in &report.model.terms {
        let row = &t.row;
        writeln!(
            w,
            "| {} | {:.0} | {:.4} | {} | {} | {} |",
            t.term,
            row.df,
            row.sum_sq,
            optional(row.mean_sq.is_finite().then_some(row.mean_sq), 4),
            optional(row.f_value, 4),
            row.p_value.map_or_else(String::new, format_p),
        )?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_t_tests<W: Write>(w: &mut W, report: &AnalysisReport) -> io::Result<()> {
    writeln!(w, "## Two-sample t-tests")?;
    writeln!(w)?;
    writeln!(
        w,
        "| Comparison | Mean 1 | Mean 2 | Diff | t | df | p-value | {:.0}% CI |",
        report.config.confidence_level * 100.0
    )?;
    writeln!(w, "|---|---:|---:|---:|---:|---:|---:|---|")?;
    for test in &report.t_tests {
        let label = format!("{} vs {}", test.first, test.second);
        match &test.outcome {
            Outcome::Completed(t) => writeln!(
                w,
                "| {label} | {:.3} | {:.3} | {:.3} | {:.4} | {:.2} | {} | ({:.3}, {:.3}) |",
                t.mean_first,
                t.mean_second,
                t.diff,
                t.t,
                t.df,
                format_p(t.p_value),
                t.lower,
                t.upper,
            )?,
            Outcome::Failed { reason } => {
                writeln!(w, "| {label} | | | | | | | failed: {reason} |")?;
            }
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Text bars of a histogram, one line per bin.
#[must_use]
pub fn histogram_lines(histogram: &Histogram) -> Vec<String> {
    let max = histogram.max_count().max(1);
    let last = histogram.bins.len().saturating_sub(1);
    let mut lines = histogram
        .bins
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let close = if i == last { ']' } else { ')' };
            let width = if max <= MAX_BAR {
                bin.count
            } else {
                bin.count * MAX_BAR / max
            };
            let bar = "#".repeat(usize::try_from(width).unwrap_or_default());
            format!(
                "[{:>6.2}, {:>6.2}{close} {bar} {}",
                bin.range.start, bin.range.end, bin.count
            )
        })
        .collect::<Vec<_>>();
    if histogram.underflow > 0 {
        lines.push(format!("below range: {}", histogram.underflow));
    }
    if histogram.overflow > 0 {
        lines.push(format!("above range: {}", histogram.overflow));
    }
    lines
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.precision$}"))
}

fn write_observations<W: Write>(w: &mut W, report: &AnalysisReport) -> io::Result<()> {
    write!(w, "| Month | Season |")?;
    for moon in MoonPhase::ALL {
        write!(w, " {moon} |")?;
    }
    writeln!(w)?;
    writeln!(w, "|---|---|{}", "---:|".repeat(MoonPhase::ALL.len()))?;
    for &month in Month::ALL {
        write!(w, "| {month} | {} |", month.season())?;
        for &moon in MoonPhase::ALL {
            let value = report
                .observations
                .iter()
                .find(|o| o.month == month && o.moon == moon)
                .map(|o| o.admissions);
            write!(w, " {} |", optional(value, 1))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn write_contingency<W, R, C>(w: &mut W, table: &ContingencyTable<R, C>) -> io::Result<()>
where
    W: Write,
    R: Label,
    C: Label,
{
    write!(w, "| |")?;
    for column in &table.columns {
        write!(w, " {column} |")?;
    }
    writeln!(w, " Total |")?;
    writeln!(w, "|---|{}", "---:|".repeat(table.columns.len() + 1))?;
    for ((row, cells), total) in table.rows.iter().zip(&table.cells).zip(&table.row_totals) {
        write!(w, "| {row} |")?;
        for cell in cells {
            write!(w, " {cell:.1} |")?;
        }
        writeln!(w, " {total:.1} |")?;
    }
    write!(w, "| Total |")?;
    for total in &table.column_totals {
        write!(w, " {total:.1} |")?;
    }
    writeln!(w, " {:.1} |", table.grand_total)
}

fn write_groups<W, K>(w: &mut W, label_col: &str, groups: &[GroupSummary<K>]) -> io::Result<()>
where
    W: Write,
    K: Display,
{
    writeln!(w, "| {label_col} | N | Mean | SD | Min | Q1 | Median | Q3 | Max |")?;
    writeln!(w, "|---|---:|---:|---:|---:|---:|---:|---:|---:|")?;
    for group in groups {
        let s = &group.stats;
        writeln!(
            w,
            "| {} | {} | {:.2} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
            group.level,
            s.count,
            s.mean,
            optional(s.std_dev, 2),
            s.min,
            s.q1,
            s.median,
            s.q3,
            s.max,
        )?;
    }
    Ok(())
}

fn write_levene<W: Write>(
    w: &mut W,
    outcome: &Outcome<AssumptionCheck<LeveneResult>>,
) -> io::Result<()> {
    match outcome {
        Outcome::Completed(check) => {
            let r = &check.result;
            writeln!(
                w,
                "| Levene ({} center) | F = {:.4} | {:.0}, {:.0} | {} | {} |",
                r.center,
                r.statistic,
                r.df_between,
                r.df_within,
                format_p(r.p_value),
                verdict(check),
            )
        }
        Outcome::Failed { reason } => writeln!(w, "| Levene | | | | failed: {reason} |"),
    }
}

fn write_shapiro<W: Write>(
    w: &mut W,
    outcome: &Outcome<AssumptionCheck<ShapiroWilkResult>>,
) -> io::Result<()> {
    match outcome {
        Outcome::Completed(check) => {
            let r = &check.result;
            writeln!(
                w,
                "| Shapiro–Wilk (residuals, n = {}) | W = {:.4} | | {} | {} |",
                r.n,
                r.statistic,
                format_p(r.p_value),
                verdict(check),
            )
        }
        Outcome::Failed { reason } => writeln!(w, "| Shapiro–Wilk | | | | failed: {reason} |"),
    }
}

fn verdict<T>(check: &AssumptionCheck<T>) -> &'static str {
    match check.verdict {
        Verdict::Satisfied => "satisfied",
        Verdict::Violated => "violated",
    }
}

fn write_posthoc<W: Write>(w: &mut W, family: &Posthoc) -> io::Result<()> {
    writeln!(w, "### {}", family.factor)?;
    writeln!(w)?;
    let comparisons = match &family.outcome {
        Outcome::Completed(comparisons) => comparisons,
        Outcome::Failed { reason } => return writeln!(w, "Not computed: {reason}."),
    };
    writeln!(
        w,
        "{:.0}% family-wise confidence, critical value q = {:.4}.",
        comparisons.confidence_level * 100.0,
        comparisons.critical_value
    )?;
    writeln!(w)?;
    writeln!(w, "| Comparison | Diff | Lower | Upper | p adj | |")?;
    writeln!(w, "|---|---:|---:|---:|---:|---|")?;
    for c in &comparisons.comparisons {
        writeln!(
            w,
            "| {} | {:.4} | {:.4} | {:.4} | {} | {} |",
            c.label(),
            c.diff,
            c.lower,
            c.upper,
            format_p(c.p_adj),
            if c.significant { "*" } else { "" },
        )?;
    }
    Ok(())
}
