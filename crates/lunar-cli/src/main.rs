use clap::Parser as _;

use crate::command::CommandArgs;

mod command;
mod logging;
mod markdown;
mod util;

fn main() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbosity());
    command::run(args)
}
