//! Transport-neutral request options and responses

use crate::utils::ACCEPT_HTML;

/// Headers and limits for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Overrides the client's default user agent when set
    pub user_agent: Option<String>,
    pub accept: String,
    /// Bodies that grow past this many bytes are abandoned
    pub max_body_bytes: Option<usize>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            accept: ACCEPT_HTML.to_string(),
            max_body_bytes: None,
        }
    }
}

impl RequestOptions {
    #[must_use]
    pub fn accepting(accept: &str) -> Self {
        Self {
            accept: accept.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = Some(max_body_bytes);
        self
    }
}

/// Outcome of a request
///
/// Transport failures are represented as `successful == false` with no status,
/// so callers never deal with errors from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebResponse {
    pub successful: bool,
    pub status: Option<u16>,
    /// Media type without parameters, lowercased (`text/html`, `image/png`)
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
    /// Final URL after redirects
    pub url: String,
}

impl WebResponse {
    /// Response for a request that never produced a status
    #[must_use]
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Successful response with a body, as built by in-memory clients
    #[must_use]
    pub fn ok(url: impl Into<String>, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            successful: true,
            status: Some(200),
            content_type: content_type.map(normalize_content_type),
            body: Some(body.into()),
            url: url.into(),
        }
    }

    /// Response with a non-2xx status
    #[must_use]
    pub fn with_status(url: impl Into<String>, status: u16) -> Self {
        Self {
            successful: (200..300).contains(&status),
            status: Some(status),
            content_type: None,
            body: None,
            url: url.into(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }

    /// Whether the reported content type could be an image
    ///
    /// A missing content type counts, and so does `application/octet-stream`,
    /// which many servers send for `.ico` files.
    #[must_use]
    pub fn has_image_content_type(&self) -> bool {
        match self.content_type.as_deref() {
            None => true,
            Some(content_type) => {
                content_type.starts_with("image/") || content_type == "application/octet-stream"
            }
        }
    }
}

/// `Image/PNG; charset=binary` -> `image/png`
#[must_use]
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
