//! Version roster from the documentation sidebar.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Settings;
use crate::error::{HarvesterError, Result};
use crate::html::{describe, element_text, find_all, find_tag, load_document, Attrs};
use crate::http::Fetch;
use crate::types::ResultTable;

pub const HEADER: [&str; 3] = ["Ссылка на документацию", "Версия", "Статус"];

/// Marker text of the sidebar list holding every version link.
const VERSIONS_MARKER: &str = "All versions";

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[Pp]ython (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("valid regex")
});

/// Split a link label like `Python 3.13 (stable)` into version and status.
///
/// Labels that don't match are returned whole as the version with an empty status.
///
/// # Examples
/// ```
/// use pydocs_harvester::pipelines::latest_versions::parse_version_label;
///
/// assert_eq!(
///     parse_version_label("Python 3.14 (in development)"),
///     ("3.14".to_string(), "in development".to_string())
/// );
/// assert_eq!(parse_version_label("All versions"), ("All versions".to_string(), String::new()));
/// ```
pub fn parse_version_label(label: &str) -> (String, String) {
    match VERSION_PATTERN.captures(label) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (label.to_string(), String::new()),
    }
}

/// Link, version and status for every documentation version in the sidebar.
pub fn latest_versions<S: Fetch + ?Sized>(session: &S, settings: &Settings) -> Result<ResultTable> {
    let index = load_document(session, settings.endpoints.docs.as_str())?;
    let sidebar = find_tag(index.root_element(), "div", &Attrs::new().class("sphinxsidebarwrapper"))?;

    let any = Attrs::new();
    let list = find_all(sidebar, "ul", &any)
        .find(|ul| ul.text().collect::<String>().contains(VERSIONS_MARKER))
        .ok_or_else(|| HarvesterError::MissingField {
            field: format!("list containing '{VERSIONS_MARKER}'"),
            context: describe(sidebar),
        })?;

    let mut table = ResultTable::new(HEADER);
    let links = Attrs::new().present("href");
    for anchor in find_all(list, "a", &links) {
        let href = anchor.value().attr("href").unwrap_or_default();
        let (version, status) = parse_version_label(&element_text(anchor));
        table.push([href.to_string(), version, status]);
    }

    tracing::info!(versions = table.len(), "Version roster collected");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{settings_for, StaticPages};
    use pretty_assertions::assert_eq;

    const INDEX: &str = r#"<html><body><div class="sphinxsidebarwrapper">
        <ul><li><a href="/3/tutorial/">Tutorial</a></li></ul>
        <ul>
          <li><a href="https://docs.python.org/3.14/">Python 3.14 (in development)</a></li>
          <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
          <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
        </ul></div></body></html>"#;

    #[test]
    fn test_version_rows() {
        let pages = StaticPages::new().page("https://docs.test/", INDEX);

        let table = latest_versions(&pages, &settings_for("https://docs.test/")).unwrap();

        assert_eq!(
            table.rows,
            vec![
                vec![
                    "https://docs.python.org/3.14/".to_string(),
                    "3.14".to_string(),
                    "in development".to_string()
                ],
                vec![
                    "https://docs.python.org/3.13/".to_string(),
                    "3.13".to_string(),
                    "stable".to_string()
                ],
                vec![
                    "https://www.python.org/doc/versions/".to_string(),
                    "All versions".to_string(),
                    String::new()
                ],
            ]
        );
    }

    #[test]
    fn test_missing_version_list_is_structure_error() {
        let pages = StaticPages::new().page(
            "https://docs.test/",
            r#"<div class="sphinxsidebarwrapper"><ul><li>Tutorial</li></ul></div>"#,
        );

        let err = latest_versions(&pages, &settings_for("https://docs.test/")).unwrap_err();
        assert!(err.is_structure());
    }

    #[test]
    fn test_lowercase_python_label() {
        assert_eq!(
            parse_version_label("python 3.9 (security-fixes)"),
            ("3.9".to_string(), "security-fixes".to_string())
        );
    }
}
