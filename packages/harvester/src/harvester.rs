//! Mode selection and dispatch, tying the session and the pipelines together.

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::Result;
use crate::http::{Fetch, HttpSession};
use crate::pipelines;
use crate::types::Outcome;

/// The pipelines this tool can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Links, titles and authors of every "What's New" page.
    WhatsNew,
    /// Documentation versions and their release status.
    LatestVersions,
    /// Download the A4 PDF documentation archive.
    Download,
    /// Count PEPs by status and report index/page disagreements.
    Pep,
}

impl Mode {
    /// Name used on the command line and in result file names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }

    /// Run this mode's pipeline against `session`.
    pub fn run<S: Fetch + ?Sized>(self, session: &S, settings: &Settings) -> Result<Outcome> {
        let outcome = match self {
            Self::WhatsNew => Outcome::Table(pipelines::whats_new(session, settings)?),
            Self::LatestVersions => Outcome::Table(pipelines::latest_versions(session, settings)?),
            Self::Download => Outcome::Saved(pipelines::download(session, settings)?),
            Self::Pep => Outcome::Table(pipelines::pep(session, settings)?),
        };
        Ok(outcome)
    }
}

/// Run `mode` with a fresh cached HTTP session.
///
/// # Arguments
/// * `mode` - Pipeline to run
/// * `settings` - Endpoints, directories and politeness delay
/// * `clear_cache` - Drop all cached pages before the run
pub fn harvest(mode: Mode, settings: &Settings, clear_cache: bool) -> Result<Outcome> {
    let session = HttpSession::from_settings(settings)?;
    if clear_cache {
        session.clear_cache()?;
    }
    tracing::info!(mode = mode.as_str(), "Running pipeline");
    mode.run(&session, settings)
}
