//! Extraction failure types
//!
//! A failed extraction is either a fetch failure or a parse failure.
//! Missing fields are not errors; they surface as `None` in the result.

use thiserror::Error;

/// Why a page could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchErrorKind {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("response body exceeds {0} bytes")]
    TooLarge(usize),
}

/// Retrieval of a product page failed; no result was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {url}: {kind}")]
pub struct FetchError {
    pub url: String,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(url: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    /// Classify a reqwest failure for `url`
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FetchErrorKind::Timeout
        } else if err.is_builder() {
            FetchErrorKind::InvalidUrl(err.to_string())
        } else if let Some(status) = err.status() {
            FetchErrorKind::Status(status.as_u16())
        } else if err.is_body() || err.is_decode() {
            FetchErrorKind::Body(err.to_string())
        } else {
            FetchErrorKind::Network(err.to_string())
        };
        Self::new(url, kind)
    }
}

/// The response could not be turned into a document tree.
///
/// HTML parsing itself is lenient, so this only happens when the server
/// answers with content that is not markup at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("response from {url} is not an HTML document (content-type: {content_type})")]
pub struct ParseError {
    pub url: String,
    pub content_type: String,
}

/// Any failure of [`crate::Extractor::extract`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ExtractError {
    pub fn url(&self) -> &str {
        match self {
            ExtractError::Fetch(e) => &e.url,
            ExtractError::Parse(e) => &e.url,
        }
    }
}
