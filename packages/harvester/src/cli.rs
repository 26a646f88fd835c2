//! Command-line interface for the harvester.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use console::style;

use crate::config::{Endpoints, Settings, DEFAULT_REQUEST_DELAY_MS, MAIN_DOC_URL, PEP_URL};
use crate::error::Result;
use crate::harvester::{harvest, Mode};
use crate::output::{control_output, OutputMode};
use crate::types::Outcome;

/// Python documentation harvester - release notes, versions, archives and PEP statuses.
#[derive(Debug, Parser)]
#[command(name = "pydocs-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pipeline to run
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the page cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Output format (default: plain rows on stdout)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Directory for cache, results, downloads and logs
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Root of the Python documentation
    #[arg(long, default_value = MAIN_DOC_URL)]
    pub docs_url: String,

    /// Root of the PEP site
    #[arg(long, default_value = PEP_URL)]
    pub peps_url: String,

    /// Pause between per-page requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
    pub delay_ms: u64,
}

impl Cli {
    /// Build run settings from the parsed arguments.
    pub fn settings(&self) -> Result<Settings> {
        let endpoints = Endpoints::new(&self.docs_url, &self.peps_url)?;
        Ok(Settings::new(&self.base_dir)
            .with_endpoints(endpoints)
            .with_request_delay(Duration::from_millis(self.delay_ms)))
    }
}

/// Run the CLI with already parsed arguments.
pub fn run(cli: &Cli) -> Result<()> {
    tracing::info!(args = ?cli, "Command line arguments");
    let settings = cli.settings()?;

    match harvest(cli.mode, &settings, cli.clear_cache)? {
        Outcome::Table(table) => {
            if let Some(path) = control_output(&table, cli.output, cli.mode, &settings)? {
                println!("{} {}", style("Saved to:").green().bold(), path.display());
            }
        }
        Outcome::Saved(path) => {
            println!("{} {}", style("Archive saved to:").green().bold(), path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_mode_only() {
        let cli = Cli::parse_from(["pydocs-harvester", "pep"]);

        assert_eq!(cli.mode, Mode::Pep);
        assert!(!cli.clear_cache);
        assert!(cli.output.is_none());
        assert_eq!(cli.delay_ms, DEFAULT_REQUEST_DELAY_MS);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from(["pydocs-harvester", "whats-new", "-c", "-o", "file"]);

        assert_eq!(cli.mode, Mode::WhatsNew);
        assert!(cli.clear_cache);
        assert_eq!(cli.output, Some(OutputMode::File));
    }

    #[test]
    fn test_cli_rejects_unknown_output() {
        let result = Cli::try_parse_from(["pydocs-harvester", "pep", "--output", "json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_from_flags() {
        let cli = Cli::parse_from([
            "pydocs-harvester",
            "latest-versions",
            "--base-dir",
            "/tmp/out",
            "--docs-url",
            "http://127.0.0.1:1234/docs",
            "--delay-ms",
            "0",
        ]);

        let settings = cli.settings().unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.endpoints.docs.as_str(), "http://127.0.0.1:1234/docs/");
        assert_eq!(settings.endpoints.peps.as_str(), PEP_URL);
        assert!(settings.request_delay.is_zero());
    }
}
