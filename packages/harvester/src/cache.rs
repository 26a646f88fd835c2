//! Persistent page cache keyed by URL.
//!
//! Each entry is a JSON file named after the SHA-256 digest of its URL.
//! Entries older than the configured TTL count as misses.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// A stored response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// File-backed response cache.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Look up a fresh entry for `url`.
    ///
    /// Unreadable or corrupt entries are treated as misses.
    pub fn get(&self, url: &str) -> Option<CacheEntry> {
        let path = self.entry_path(url);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable cache entry");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt cache entry ignored");
                return None;
            }
        };

        if entry.url != url || !self.is_fresh(&entry) {
            return None;
        }
        Some(entry)
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        let age = Utc::now().signed_duration_since(entry.fetched_at);
        match age.to_std() {
            Ok(age) => age <= self.ttl,
            // Timestamp in the future: clock moved, keep the entry.
            Err(_) => true,
        }
    }

    /// Write `entry`, replacing any previous entry for the same URL.
    pub fn store(&self, entry: &CacheEntry) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(&entry.url);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, serde_json::to_vec(entry)?)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    /// Remove every entry. Returns the number of entries deleted.
    pub fn clear(&self) -> Result<usize> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for item in read_dir {
            let path = item?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        tracing::info!(dir = %self.dir.display(), removed, "Cache cleared");
        Ok(removed)
    }
}
