//! `templater` binary: parses arguments and dispatches to a command.
use anyhow::Result;
use clap::Parser;

use templater_cli::cli::{Cli, Command};
use templater_cli::commands;
use templater_cli::exec::SystemExecutor;
use templater_cli::fs::SystemFileSystemOps;
use templater_cli::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.command.name();
    init_subscriber(args.verbose, command);
    let log = Logger::new(command);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let fs = SystemFileSystemOps;

    match args.command {
        Command::List(opts) => commands::list::run(&opts, &fs, &mut out),
        Command::Status(opts) => commands::status::run(&opts, &fs, &mut out),
        Command::Apply(opts) => commands::apply::run(&opts, &fs, &SystemExecutor, &log, &mut out),
        Command::Version => commands::version::run(&mut out),
    }
}
