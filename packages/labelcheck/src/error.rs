//! Typed errors for the label analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during a label analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No product images could be acquired at all.
    ///
    /// Individual image fetch failures are dropped silently at the
    /// acquisition layer; this fires only when the whole set came up empty.
    #[error("no product images could be acquired from: {origin}")]
    AcquisitionFailure { origin: String },

    /// The model's response could not be parsed as the expected encoding.
    ///
    /// Carries the raw response text for diagnostics. Never retried.
    #[error("malformed model output: {reason}")]
    MalformedModelOutput { reason: String, raw: String },

    /// One or more reference tables failed to load. Classifying against
    /// partial tables would be misleading, so this is fatal per request.
    #[error("reference data unavailable: {0}")]
    ReferenceDataUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The generative model call itself failed.
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// External search failed (only surfaced by direct searcher calls;
    /// the enricher absorbs these).
    #[error("search error: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Image acquisition failed at the scrape/fetch level.
    #[error("acquire failed: {0}")]
    Acquire(#[from] AcquireError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Build a `MalformedModelOutput`, keeping the raw text intact.
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedModelOutput {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}

/// Errors that can occur while acquiring product images.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// No site profile matches this product URL's host
    #[error("unsupported site: {host}")]
    UnsupportedSite { host: String },

    /// The product page loaded but contained no image gallery
    #[error("no image gallery found at: {url}")]
    GalleryNotFound { url: String },

    /// Image bytes could not be decoded
    #[error("image decode failed for {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Local file could not be read
    #[error("cannot read image file: {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for acquisition operations.
pub type AcquireResult<T> = std::result::Result<T, AcquireError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_acquisition_failure_names_its_origin() {
        let err = AnalysisError::AcquisitionFailure {
            origin: "https://blinkit.com/prn/ketchup/prid/436913".to_string(),
        };
        assert!(err.to_string().contains("blinkit.com"));
        // The origin is plain description text, not an underlying cause.
        assert!(err.source().is_none());
    }

    #[test]
    fn test_acquire_error_chains_into_analysis_error() {
        let err: AnalysisError = AcquireError::InvalidUrl {
            url: "not a url".to_string(),
        }
        .into();
        assert!(matches!(err, AnalysisError::Acquire(_)));
        assert!(err.source().is_some());
    }
}
