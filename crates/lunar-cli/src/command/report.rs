use anyhow::Context as _;

use crate::{command::AnalysisArg, markdown, util::Output};

pub(crate) fn run(arg: &AnalysisArg) -> anyhow::Result<()> {
    let report = arg.analyze()?;
    let mut output = Output::from_output_path(arg.output.as_deref())?;
    markdown::write_report(&mut output, &report)
        .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
    output.finish()
}
