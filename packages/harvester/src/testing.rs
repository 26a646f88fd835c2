//! In-memory page source for pipeline unit tests.

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::time::Duration;

use crate::config::{Endpoints, Settings};
use crate::error::{HarvesterError, Result};
use crate::http::{CachedResponse, Fetch};

/// Serves fixed pages; any other URL fails like an unreachable host.
#[derive(Debug, Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_string(), bytes.to_vec());
        self
    }

    fn unreachable(url: &str) -> HarvesterError {
        HarvesterError::request(url, std::io::Error::new(ErrorKind::NotFound, "no such page"))
    }
}

impl Fetch for StaticPages {
    fn fetch(&self, url: &str) -> Result<CachedResponse> {
        let text = self.pages.get(url).ok_or_else(|| Self::unreachable(url))?;
        Ok(CachedResponse {
            url: url.to_string(),
            status: 200,
            text: text.clone(),
            from_cache: false,
        })
    }

    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        let bytes = self.files.get(url).ok_or_else(|| Self::unreachable(url))?;
        sink.write_all(bytes)?;
        Ok(bytes.len() as u64)
    }
}

/// Settings pointing both sites at `base`, without politeness delay.
pub fn settings_for(base: &str) -> Settings {
    let endpoints = Endpoints::new(base, base).unwrap_or_default();
    Settings::new(std::env::temp_dir())
        .with_endpoints(endpoints)
        .with_request_delay(Duration::ZERO)
}
