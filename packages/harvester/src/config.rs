//! Configuration constants and runtime settings for the harvester.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::FixedOffset;
use url::Url;

use crate::error::{HarvesterError, Result};

/// Root of the Python documentation.
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Root of the PEP index site.
pub const PEP_URL: &str = "https://peps.python.org/";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Cached pages older than this are fetched again.
pub const CACHE_TTL_SECS: u64 = 3600;

/// Pause between consecutive per-item fetches.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 100;

/// Timestamp format used in result file names.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// UTC offset of result file timestamps (Europe/Moscow, no DST).
pub const RESULTS_UTC_OFFSET_SECS: i32 = 3 * 3600;

pub const CACHE_DIR: &str = "cache";
pub const RESULTS_DIR: &str = "results";
pub const DOWNLOADS_DIR: &str = "downloads";
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "parser";
pub const LOG_FILE_SUFFIX: &str = "log";

/// Rotated log files kept on disk, the current one included.
pub const LOG_MAX_FILES: usize = 5;

/// Parse a base URL, forcing a trailing slash so relative joins stay below it.
///
/// # Examples
/// ```
/// use pydocs_harvester::config::parse_base_url;
///
/// let url = parse_base_url("https://docs.python.org/3").unwrap();
/// assert_eq!(url.as_str(), "https://docs.python.org/3/");
/// assert!(parse_base_url("not a url").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|source| HarvesterError::InvalidLink {
        href: raw.to_string(),
        source,
    })
}

/// Resolve `href` relative to `base`.
pub fn join_url(base: &Url, href: &str) -> Result<Url> {
    base.join(href).map_err(|source| HarvesterError::InvalidLink {
        href: href.to_string(),
        source,
    })
}

/// Site roots the pipelines start from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub docs: Url,
    pub peps: Url,
}

impl Endpoints {
    pub fn new(docs: &str, peps: &str) -> Result<Self> {
        Ok(Self {
            docs: parse_base_url(docs)?,
            peps: parse_base_url(peps)?,
        })
    }

    pub fn whats_new(&self) -> Result<Url> {
        join_url(&self.docs, "whatsnew/")
    }

    pub fn download_page(&self) -> Result<Url> {
        join_url(&self.docs, "download.html")
    }
}

impl Default for Endpoints {
    #[allow(clippy::expect_used)] // Static URLs that are guaranteed to parse
    fn default() -> Self {
        Self {
            docs: Url::parse(MAIN_DOC_URL).expect("valid docs url"),
            peps: Url::parse(PEP_URL).expect("valid pep url"),
        }
    }
}

/// Everything a run needs besides the session.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory under which cache, results, downloads and logs live.
    pub base_dir: PathBuf,
    pub endpoints: Endpoints,
    pub request_delay: Duration,
    pub cache_ttl: Duration,
    /// Offset used to timestamp result files.
    pub timezone: FixedOffset,
}

impl Settings {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            endpoints: Endpoints::default(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            cache_ttl: Duration::from_secs(CACHE_TTL_SECS),
            timezone: results_timezone(),
        }
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join(CACHE_DIR)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_DIR)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join(DOWNLOADS_DIR)
    }
}

/// Directory holding the rotated log files below `base_dir`.
pub fn log_dir_in(base_dir: &Path) -> PathBuf {
    base_dir.join(LOG_DIR)
}

#[allow(clippy::expect_used)] // Constant offset well inside the valid range
fn results_timezone() -> FixedOffset {
    FixedOffset::east_opt(RESULTS_UTC_OFFSET_SECS).expect("valid UTC offset")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/docs").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/docs/");

        let url = parse_base_url("https://peps.python.org/").unwrap();
        assert_eq!(url.as_str(), "https://peps.python.org/");
    }

    #[test]
    fn test_parse_base_url_invalid() {
        let err = parse_base_url("::nope").unwrap_err();
        assert!(err.is_structure());
    }

    #[test]
    fn test_endpoint_pages() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.whats_new().unwrap().as_str(),
            "https://docs.python.org/3/whatsnew/"
        );
        assert_eq!(
            endpoints.download_page().unwrap().as_str(),
            "https://docs.python.org/3/download.html"
        );
    }

    #[test]
    fn test_join_url_relative_and_absolute() {
        let base = parse_base_url(PEP_URL).unwrap();
        assert_eq!(
            join_url(&base, "pep-0008/").unwrap().as_str(),
            "https://peps.python.org/pep-0008/"
        );
        assert_eq!(
            join_url(&base, "https://example.org/x").unwrap().as_str(),
            "https://example.org/x"
        );
    }

    #[test]
    fn test_settings_paths() {
        let settings = Settings::new("/tmp/run");
        assert_eq!(settings.cache_dir(), PathBuf::from("/tmp/run/cache"));
        assert_eq!(settings.results_dir(), PathBuf::from("/tmp/run/results"));
        assert_eq!(settings.downloads_dir(), PathBuf::from("/tmp/run/downloads"));
        assert_eq!(log_dir_in(&settings.base_dir), PathBuf::from("/tmp/run/logs"));
        assert_eq!(settings.request_delay, Duration::from_millis(100));
        assert_eq!(settings.timezone.local_minus_utc(), 3 * 3600);
    }
}
