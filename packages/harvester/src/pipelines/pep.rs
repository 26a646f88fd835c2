//! PEP status reconciliation.
//!
//! The index page only shows an abbreviated status per PEP. Each PEP's own
//! page is visited to read the authoritative status, which is tallied and
//! compared against the statuses the abbreviation allows.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};
use url::Url;

use super::{pause, progress_bar};
use crate::config::{join_url, Settings};
use crate::error::{HarvesterError, Result};
use crate::html::{describe, element_text, find_all, find_tag, load_document, Attrs};
use crate::http::Fetch;
use crate::types::{Mismatch, PreviewEntry, ResultTable};

pub const HEADER: [&str; 2] = ["Статус", "Количество"];
pub const TOTAL_LABEL: &str = "Total";

/// Statuses a preview code allows, or `None` for an unknown code.
///
/// # Examples
/// ```
/// use pydocs_harvester::pipelines::pep::expected_statuses;
///
/// assert_eq!(expected_statuses("A"), Some(&["Active", "Accepted"][..]));
/// assert_eq!(expected_statuses(""), Some(&["Draft", "Active"][..]));
/// assert_eq!(expected_statuses("X"), None);
/// ```
pub fn expected_statuses(code: &str) -> Option<&'static [&'static str]> {
    let statuses: &'static [&'static str] = match code {
        "A" => &["Active", "Accepted"],
        "D" => &["Deferred"],
        "F" => &["Final"],
        "P" => &["Provisional"],
        "R" => &["Rejected"],
        "S" => &["Superseded"],
        "W" => &["Withdrawn"],
        "" => &["Draft", "Active"],
        _ => return None,
    };
    Some(statuses)
}

/// Accumulated state of one reconciliation run.
#[derive(Debug, Default)]
pub struct PepReport {
    /// Authoritative status -> number of PEPs.
    pub tally: BTreeMap<String, usize>,
    pub mismatches: Vec<Mismatch>,
    /// Counted entries whose preview code has no expected statuses.
    pub unknown_codes: Vec<PreviewEntry>,
    /// Entries left out of the tally, in encounter order.
    pub errors: Vec<HarvesterError>,
}

impl PepReport {
    /// Count `status` for `entry` and check it against the preview code.
    ///
    /// An unknown preview code cannot be checked. The entry is noted in
    /// `unknown_codes` and its status is still counted.
    pub fn record(&mut self, entry: &PreviewEntry, status: String) {
        match expected_statuses(&entry.code) {
            Some(expected) if !expected.contains(&status.as_str()) => {
                self.mismatches.push(Mismatch {
                    link: entry.link.clone(),
                    status: status.clone(),
                    expected: expected.iter().map(|s| (*s).to_string()).collect(),
                });
            }
            Some(_) => {}
            None => self.unknown_codes.push(entry.clone()),
        }
        *self.tally.entry(status).or_insert(0) += 1;
    }

    /// Number of PEPs whose status was read.
    pub fn total(&self) -> usize {
        self.tally.values().sum()
    }

    /// Log every error, mismatch and unknown preview code.
    pub fn log_diagnostics(&self) {
        super::log_skipped("pep", &self.errors);
        for entry in &self.unknown_codes {
            tracing::warn!(
                link = %entry.link,
                code = %entry.code,
                "Unknown preview status code, status not checked"
            );
        }
        for mismatch in &self.mismatches {
            tracing::warn!(
                link = %mismatch.link,
                status = %mismatch.status,
                expected = ?mismatch.expected,
                "Status on PEP page differs from index"
            );
        }
    }

    /// Header, statuses in ascending order, then the total.
    pub fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(HEADER);
        for (status, count) in &self.tally {
            table.push([status.clone(), count.to_string()]);
        }
        table.push([TOTAL_LABEL.to_string(), self.total().to_string()]);
        table
    }
}

/// Rows of the numerical index table. Missing table structure is fatal.
pub fn index_rows(index: &Html) -> Result<Vec<ElementRef<'_>>> {
    let section = find_tag(index.root_element(), "section", &Attrs::new().id("numerical-index"))?;
    let table = find_tag(section, "table", &Attrs::new().class("pep-zero-table"))?;
    let tbody = find_tag(table, "tbody", &Attrs::new())?;
    let any = Attrs::new();
    Ok(find_all(tbody, "tr", &any).collect())
}

/// Preview entry for an index row, `None` for rows without data cells.
pub fn preview_entry(row: ElementRef<'_>, base: &Url) -> Result<Option<PreviewEntry>> {
    let any = Attrs::new();
    let cells: Vec<_> = find_all(row, "td", &any).collect();
    let Some(first) = cells.first() else {
        return Ok(None);
    };

    let abbr = find_tag(*first, "abbr", &any)?;
    let code: String = element_text(abbr).chars().skip(1).collect();

    let link_cell = cells.get(1).ok_or_else(|| HarvesterError::MissingField {
        field: "PEP number cell".to_string(),
        context: describe(row),
    })?;
    let anchor = find_tag(*link_cell, "a", &Attrs::new().present("href"))?;
    let href = anchor.value().attr("href").unwrap_or_default();

    Ok(Some(PreviewEntry {
        code,
        link: join_url(base, href)?.to_string(),
    }))
}

/// Authoritative status from a PEP page's field list.
pub fn extract_status(page: &Html) -> Result<String> {
    let content = find_tag(page.root_element(), "section", &Attrs::new().id("pep-content"))?;
    let fields = find_tag(content, "dl", &Attrs::new().class("field-list"))?;

    let any = Attrs::new();
    let status = find_all(fields, "dt", &any)
        .find(|dt| element_text(*dt).trim_end_matches(':').trim() == "Status")
        .and_then(|dt| dt.next_siblings().find_map(ElementRef::wrap))
        .filter(|dd| dd.value().name() == "dd")
        .map(element_text)
        .filter(|text| !text.is_empty());

    status.ok_or_else(|| HarvesterError::MissingField {
        field: "Status".to_string(),
        context: describe(fields),
    })
}

fn fetch_status<S: Fetch + ?Sized>(session: &S, link: &str) -> Result<String> {
    let page = load_document(session, link)?;
    extract_status(&page)
}

/// Run the reconciliation and return the raw report.
///
/// Fails only if the index page cannot be loaded or has no results table.
pub fn collect_report<S: Fetch + ?Sized>(session: &S, settings: &Settings) -> Result<PepReport> {
    let base = &settings.endpoints.peps;
    let index = load_document(session, base.as_str())?;
    let rows = index_rows(&index)?;

    let mut report = PepReport::default();
    let pb = progress_bar(rows.len(), "PEP statuses");
    let mut fetched_any = false;

    for row in rows {
        pb.inc(1);
        let entry = match preview_entry(row, base) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(e) => {
                report.errors.push(e);
                continue;
            }
        };

        if fetched_any {
            pause(settings.request_delay);
        }
        fetched_any = true;

        match fetch_status(session, &entry.link) {
            Ok(status) => report.record(&entry, status),
            Err(e) => report.errors.push(e),
        }
    }
    pb.finish_and_clear();

    tracing::info!(
        counted = report.total(),
        skipped = report.errors.len(),
        mismatches = report.mismatches.len(),
        unknown_codes = report.unknown_codes.len(),
        "PEP reconciliation finished"
    );
    Ok(report)
}

/// Status counts for every PEP listed in the numerical index.
pub fn pep<S: Fetch + ?Sized>(session: &S, settings: &Settings) -> Result<ResultTable> {
    let report = collect_report(session, settings)?;
    report.log_diagnostics();
    Ok(report.to_table())
}
