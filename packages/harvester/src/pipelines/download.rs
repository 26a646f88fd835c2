//! Documentation archive download.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::{join_url, Settings};
use crate::error::{HarvesterError, Result};
use crate::html::{find_tag, load_document, Attrs};
use crate::http::Fetch;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARCHIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+pdf-a4\.zip$").expect("valid regex"));

/// Last path segment of `url`, used as the on-disk file name.
///
/// # Examples
/// ```
/// use url::Url;
/// use pydocs_harvester::pipelines::download::archive_file_name;
///
/// let url = Url::parse("https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip").unwrap();
/// assert_eq!(archive_file_name(&url).unwrap(), "python-3.13-docs-pdf-a4.zip");
/// ```
pub fn archive_file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| HarvesterError::MissingField {
            field: "archive file name".to_string(),
            context: url.to_string(),
        })
}

/// Download the A4 PDF documentation archive into the downloads directory.
///
/// An existing file with the same name is replaced.
pub fn download<S: Fetch + ?Sized>(session: &S, settings: &Settings) -> Result<PathBuf> {
    let page_url = settings.endpoints.download_page()?;
    let page = load_document(session, page_url.as_str())?;

    let main = find_tag(page.root_element(), "div", &Attrs::new().attr("role", "main"))?;
    let table = find_tag(main, "table", &Attrs::new().class("docutils"))?;
    let anchor = find_tag(table, "a", &Attrs::new().matching("href", ARCHIVE_PATTERN.clone()))?;
    let href = anchor.value().attr("href").unwrap_or_default();
    let archive_url = join_url(&page_url, href)?;
    let file_name = archive_file_name(&archive_url)?;

    let downloads_dir = settings.downloads_dir();
    fs::create_dir_all(&downloads_dir)?;
    let archive_path = downloads_dir.join(&file_name);
    let temp_path = downloads_dir.join(format!(".{file_name}.part"));

    let written = {
        let mut file = File::create(&temp_path)?;
        let written = match session.download(archive_url.as_str(), &mut file) {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&temp_path);
                return Err(e);
            }
        };
        file.sync_all()?;
        written
    };

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if archive_path.exists() {
        fs::remove_file(&archive_path)?;
    }
    fs::rename(&temp_path, &archive_path)?;

    tracing::info!(path = %archive_path.display(), bytes = written, "Archive saved");
    Ok(archive_path)
}
