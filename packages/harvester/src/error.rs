//! Error types for the harvester.
//!
//! Two categories matter to callers: request errors (a page could not be
//! fetched) and structure errors (a page no longer has the shape the
//! pipelines rely on). Together they form the domain category reported by
//! [`HarvesterError::is_domain`]. Everything else is unexpected.

use thiserror::Error;

/// Boxed transport error, so fetchers other than reqwest can report failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Fetching a URL failed at the transport level or with a non-2xx status.
    #[error("Failed to load page {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A required element is absent from the document.
    #[error("Tag <{tag}>{filter} not found in {context}")]
    MissingTag {
        tag: String,
        filter: String,
        context: String,
    },

    /// A required field inside a located element is absent.
    #[error("Field '{field}' not found in {context}")]
    MissingField { field: String, context: String },

    /// A link on the page could not be resolved against its base URL.
    #[error("Invalid link '{href}': {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache entry could not be (de)serialized.
    #[error("Cache entry serialization failed: {0}")]
    CacheEntry(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

impl HarvesterError {
    /// Build a request error for `url`.
    pub fn request(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Request {
            url: url.into(),
            source: source.into(),
        }
    }

    /// True for transport failures.
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// True when the page structure did not match expectations.
    #[must_use]
    pub fn is_structure(&self) -> bool {
        matches!(
            self,
            Self::MissingTag { .. } | Self::MissingField { .. } | Self::InvalidLink { .. }
        )
    }

    /// True for anticipated failures: request and structure errors.
    /// Anything else indicates a defect or an environment problem.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        self.is_request() || self.is_structure()
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
