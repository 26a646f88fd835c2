//! Python documentation harvester.
//!
//! Extracts tabular data from docs.python.org and peps.python.org: release
//! notes, the documentation version roster, the PDF archive, and PEP status
//! counts reconciled against each PEP's own page.
//!
//! # Example
//!
//! ```
//! use pydocs_harvester::pipelines::pep::expected_statuses;
//!
//! assert!(expected_statuses("F").unwrap().contains(&"Final"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, endpoints and run settings
//! - [`error`]: Error types and Result alias
//! - [`cache`]: Persistent page cache keyed by URL
//! - [`http`]: Cached HTTP session and the [`http::Fetch`] seam
//! - [`html`]: Document loading and mandatory element lookup
//! - [`types`]: Preview entries, mismatches and result tables
//! - [`pipelines`]: The four extraction pipelines
//! - [`harvester`]: Mode selection and dispatch
//! - [`output`]: Plain, pretty and CSV result sinks
//! - [`logging`]: Tracing subscriber setup
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod html;
pub mod http;
pub mod logging;
pub mod output;
pub mod pipelines;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main functions
pub use harvester::{harvest, Mode};

// Re-export commonly used items
pub use error::{HarvesterError, Result};
pub use http::{CachedResponse, Fetch, HttpSession};
pub use types::{Mismatch, Outcome, PreviewEntry, ResultTable};
