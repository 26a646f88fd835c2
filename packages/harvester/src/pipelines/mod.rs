//! Extraction pipelines.
//!
//! Each pipeline loads one index page (failures there are fatal) and then
//! walks its entries. Per-entry failures are collected, logged once at the
//! end and never abort the run.

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::HarvesterError;

pub use download::download;
pub use latest_versions::latest_versions;
pub use pep::{pep, PepReport};
pub use whats_new::whats_new;

/// Progress bar for a per-entry loop.
fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.blue}] {pos}/{len}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb
}

/// Politeness delay between consecutive per-entry fetches.
fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// Emit every collected per-entry error.
fn log_skipped(pipeline: &str, errors: &[HarvesterError]) {
    for error in errors {
        tracing::warn!(pipeline, error = %error, "Entry skipped");
    }
}
