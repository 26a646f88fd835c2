//! HTTP session with a persistent page cache.
//!
//! Every page is decoded as UTF-8 regardless of what the server declares.
//! There is exactly one attempt per URL; failures surface immediately as
//! [`HarvesterError::Request`] and the caller decides whether they are fatal.

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;

use crate::cache::{CacheEntry, ResponseCache};
use crate::config::{Settings, HTTP_TIMEOUT_SECS};
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("pydocs-harvester/", env!("CARGO_PKG_VERSION"));

/// A decoded page plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub url: String,
    pub status: u16,
    pub text: String,
    pub from_cache: bool,
}

/// Anything that can hand out pages and stream binary content.
///
/// Pipelines only depend on this trait, so they can run against a real
/// [`HttpSession`] or an in-memory page set.
pub trait Fetch {
    /// GET `url` and return its body decoded as UTF-8.
    fn fetch(&self, url: &str) -> Result<CachedResponse>;

    /// GET `url` and copy the raw body into `sink`. Returns bytes written.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64>;
}

/// Create a configured HTTP client.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Decode a response body as UTF-8, replacing invalid sequences.
pub fn decode_body(bytes: &[u8], url: &str) -> String {
    match String::from_utf8_lossy(bytes) {
        std::borrow::Cow::Borrowed(text) => text.to_string(),
        std::borrow::Cow::Owned(text) => {
            tracing::warn!(url, "Invalid UTF-8 in response body, replaced with U+FFFD");
            text
        }
    }
}

/// Blocking HTTP session backed by a [`ResponseCache`].
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    cache: ResponseCache,
}

impl HttpSession {
    pub fn new(client: Client, cache: ResponseCache) -> Self {
        Self { client, cache }
    }

    /// Session with the default client and a cache under the settings' base directory.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let cache = ResponseCache::new(settings.cache_dir(), settings.cache_ttl);
        Ok(Self::new(create_client()?, cache))
    }

    /// Drop every cached page. Meant to run before a pipeline, never during one.
    pub fn clear_cache(&self) -> Result<usize> {
        self.cache.clear()
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        self.client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| HarvesterError::request(url, e))
    }
}

impl Fetch for HttpSession {
    fn fetch(&self, url: &str) -> Result<CachedResponse> {
        let (entry, from_cache) = match self.cache.get(url) {
            Some(entry) => (entry, true),
            None => {
                let response = self.get(url)?;
                let status = response.status().as_u16();
                let bytes = response
                    .bytes()
                    .map_err(|e| HarvesterError::request(url, e))?;
                let entry = CacheEntry {
                    url: url.to_string(),
                    status,
                    body: decode_body(&bytes, url),
                    fetched_at: Utc::now(),
                };
                (entry, false)
            }
        };
        tracing::debug!(url, from_cache, "Page loaded");

        if let Err(e) = self.cache.store(&entry) {
            tracing::warn!(url, error = %e, "Failed to write cache entry");
        }

        Ok(CachedResponse {
            url: entry.url,
            status: entry.status,
            text: entry.body,
            from_cache,
        })
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        let mut response = self.get(url)?;
        let written = response
            .copy_to(sink)
            .map_err(|e| HarvesterError::request(url, e))?;
        tracing::debug!(url, bytes = written, "Binary content streamed");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_decode_body_valid() {
        assert_eq!(decode_body("Статус".as_bytes(), "u"), "Статус");
    }

    #[test]
    fn test_decode_body_invalid_bytes() {
        let text = decode_body(&[b'a', 0xFF, b'b'], "u");
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn test_unreachable_host_is_request_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = HttpSession::new(
            create_client().unwrap(),
            ResponseCache::new(dir.path(), Duration::from_secs(60)),
        );

        // Port 9 (discard) on localhost is closed in test environments.
        let err = session.fetch("http://127.0.0.1:9/").unwrap_err();
        assert!(err.is_request());
    }

    #[test]
    fn test_cache_hit_keeps_fetch_time() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), Duration::from_secs(3600));
        let url = "http://127.0.0.1:9/pep-0001/";
        let fetched_at = Utc::now() - chrono::Duration::minutes(10);
        cache
            .store(&CacheEntry {
                url: url.to_string(),
                status: 200,
                body: "<html></html>".to_string(),
                fetched_at,
            })
            .unwrap();
        let session = HttpSession::new(create_client().unwrap(), cache.clone());

        let response = session.fetch(url).unwrap();

        assert!(response.from_cache);
        assert_eq!(response.text, "<html></html>");
        // Expiry counts from the network fetch, not from the last hit.
        assert_eq!(cache.get(url).unwrap().fetched_at, fetched_at);
    }
}
