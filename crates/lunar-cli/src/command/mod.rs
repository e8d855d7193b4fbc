use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use lunar_analysis::{AnalysisConfig, AnalysisReport};
use lunar_stats::levene::LeveneCenter;

use crate::{logging::Verbosity, util};

mod report;
mod results;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// What to produce from the admissions table
    #[command(subcommand)]
    mode: Mode,
}

impl CommandArgs {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Render the full analysis as a Markdown document
    Report(#[clap(flatten)] AnalysisArg),
    /// Write every computed statistic as JSON
    Results(#[clap(flatten)] AnalysisArg),
    /// Print descriptive tables of the admissions table
    Summary(#[clap(flatten)] summary::SummaryArg),
}

/// Arguments shared by the commands that run the whole analysis.
#[derive(Debug, Clone, Args)]
pub(crate) struct AnalysisArg {
    /// Path to the admissions CSV file (`Month,Moon,Admission`)
    pub data: PathBuf,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Analysis parameters as JSON; missing fields take their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Significance level, overriding the config file
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Center of Levene's test, overriding the config file
    #[arg(long)]
    pub levene_center: Option<LeveneCenter>,
}

impl AnalysisArg {
    fn config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(center) = self.levene_center {
            config.levene_center = center;
        }
        Ok(config)
    }

    fn analyze(&self) -> anyhow::Result<AnalysisReport> {
        let config = self.config()?;
        let dataset = util::read_dataset_file(&self.data)?;
        lunar_analysis::report::analyze(&dataset, &config)
            .with_context(|| format!("Failed to analyze {}", self.data.display()))
    }
}

pub fn run(args: CommandArgs) -> anyhow::Result<()> {
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Results(arg) => results::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
    }
    Ok(())
}
