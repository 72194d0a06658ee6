//! `policygen` binary: parse arguments, set up logging, dispatch.
use anyhow::Result;
use clap::Parser;

use browser_policy_gen::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if let cli::Command::Version = args.command {
        commands::version::run();
        return Ok(());
    }

    let name = args.command.name();
    logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(name);

    match args.command {
        cli::Command::Generate(opts) => commands::generate::run(&args.global, &opts, &log),
        cli::Command::Validate => commands::validate::run(&args.global, &log),
        cli::Command::Version => Ok(()),
    }
}
