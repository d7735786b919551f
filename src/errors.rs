//! Error types for favicon discovery
//!
//! None of these escape the public discovery entry points: every failure is
//! logged where it happens and folded into "fewer candidates". They exist so
//! that internal helpers can use `?` and so that configuration validation has
//! something typed to return.

use thiserror::Error;

/// Result type alias for favicon operations
pub type FaviconResult<T> = Result<T, FaviconError>;

/// Error types for favicon operations
#[derive(Debug, Error)]
pub enum FaviconError {
    /// Transport-level failure (DNS, connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    UnsuccessfulStatus { url: String, status: u16 },

    /// Successful response without a body
    #[error("Empty response body for {0}")]
    EmptyBody(String),

    /// Web manifest (or service JSON) could not be decoded
    #[error("Failed to decode JSON: {0}")]
    ManifestDecode(#[from] serde_json::Error),

    /// Downloaded bytes are not a recognizable image
    #[error("Failed to read image dimensions from {url}: {message}")]
    ImageDecode { url: String, message: String },

    /// Configuration rejected by the builder
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FaviconError {
    /// Check if the error stems from the network rather than from content
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FaviconError::Http(_) | FaviconError::UnsuccessfulStatus { .. }
        )
    }
}
