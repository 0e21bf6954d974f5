use std::fmt;

use async_trait::async_trait;

use crate::core::book::BookSummary;
use crate::core::text::{StringKey, UiText};

/// Errors a search backend can report. Each maps to one display message;
/// the browse core only ever sees that message.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Transport timeout or HTTP 408.
    RequestTimeout,
    /// HTTP 429.
    TooManyRequests,
    /// DNS failure or connection refused.
    NoInternet,
    /// HTTP 5xx.
    Server { status: u16 },
    /// The backend answered but the body could not be decoded.
    Serialization(String),
    /// Anything else, including unexpected HTTP statuses and local I/O.
    Unknown(String),
}

impl SearchError {
    /// Classify an HTTP status that is not a success.
    pub fn from_status(status: u16) -> SearchError {
        match status {
            408 => SearchError::RequestTimeout,
            429 => SearchError::TooManyRequests,
            500..=599 => SearchError::Server { status },
            other => SearchError::Unknown(format!("unexpected HTTP status {other}")),
        }
    }

    pub fn ui_text(&self) -> UiText {
        let key = match self {
            SearchError::RequestTimeout => StringKey::ErrorRequestTimeout,
            SearchError::TooManyRequests => StringKey::ErrorTooManyRequests,
            SearchError::NoInternet => StringKey::ErrorNoInternet,
            SearchError::Server { .. } => StringKey::ErrorServer,
            SearchError::Serialization(_) => StringKey::ErrorSerialization,
            SearchError::Unknown(_) => StringKey::ErrorUnknown,
        };
        UiText::Resource(key)
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::RequestTimeout => write!(f, "request timed out"),
            SearchError::TooManyRequests => write!(f, "too many requests"),
            SearchError::NoInternet => write!(f, "could not reach server"),
            SearchError::Server { status } => write!(f, "server error (HTTP {status})"),
            SearchError::Serialization(msg) => write!(f, "could not decode response: {msg}"),
            SearchError::Unknown(msg) => write!(f, "unknown error: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Everything a provider needs to run one search.
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs a search and returns at most `request.limit` books, in
    /// relevance order.
    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookSummary>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(SearchError::from_status(408), SearchError::RequestTimeout);
        assert_eq!(SearchError::from_status(429), SearchError::TooManyRequests);
        assert_eq!(SearchError::from_status(503), SearchError::Server { status: 503 });
        assert!(matches!(SearchError::from_status(404), SearchError::Unknown(_)));
    }

    #[test]
    fn test_every_error_has_a_message() {
        let errors = [
            SearchError::RequestTimeout,
            SearchError::TooManyRequests,
            SearchError::NoInternet,
            SearchError::Server { status: 500 },
            SearchError::Serialization("eof".into()),
            SearchError::Unknown("?".into()),
        ];
        for error in errors {
            assert!(matches!(error.ui_text(), UiText::Resource(_)));
            assert!(!error.ui_text().as_string().is_empty());
        }
    }
}
