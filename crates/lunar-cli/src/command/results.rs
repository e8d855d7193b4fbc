use crate::{command::AnalysisArg, util::Output};

pub(crate) fn run(arg: &AnalysisArg) -> anyhow::Result<()> {
    let report = arg.analyze()?;
    let mut output = Output::from_output_path(arg.output.as_deref())?;
    output.write_json(&report)
}
