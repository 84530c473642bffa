use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use cablesel_cli::cli::{Cli, Commands};

mod commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install log subscriber: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    debug!(command = ?cli.command, "dispatching");
    match &cli.command {
        Commands::Catalog { command } => commands::catalog::handle(cli, command),
        Commands::Select {
            load,
            sort,
            desc,
            format,
        } => commands::select::handle(cli, load, *sort, *desc, *format),
        Commands::Check {
            cable,
            load,
            format,
        } => commands::check::handle(cli, *cable, load, *format),
        Commands::Report {
            cable,
            load,
            out,
            format,
        } => commands::report::handle(cli, *cable, load, out.as_deref(), *format),
        Commands::Config { command } => commands::config::handle(cli, command),
        Commands::Completions { shell, out } => commands::completions::handle(*shell, out.as_deref()),
    }
}
