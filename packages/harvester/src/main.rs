//! CLI entry point for the harvester.

use std::process::ExitCode;

use clap::Parser;
use pydocs_harvester::cli::{self, Cli};
use pydocs_harvester::config::log_dir_in;
use pydocs_harvester::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(&log_dir_in(&cli.base_dir));
    tracing::info!("Harvester started");

    match cli::run(&cli) {
        Ok(()) => {
            tracing::info!("Harvester finished");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_domain() => {
            tracing::error!(error = %e, "Run aborted");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = ?e, "Unexpected failure");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
