//! `macify` command-line entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use macify_cli::{cli, commands, logging};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let command = match &args.command {
        cli::Command::Apply(_) => "apply",
        cli::Command::Probe => "probe",
        cli::Command::Version => {
            commands::version::run();
            return ExitCode::SUCCESS;
        }
    };
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    let result = match &args.command {
        cli::Command::Apply(opts) => commands::apply::run(&args.global, opts, &log),
        cli::Command::Probe => commands::probe::run(&args.global, &log),
        cli::Command::Version => Ok(()),
    };
    commands::finish(&result, log.as_ref())
}
