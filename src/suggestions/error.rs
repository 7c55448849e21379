//! Error types for the suggestions module.

use thiserror::Error;

/// A suggestion response did not have the shape its parser expects.
///
/// This is the only failure a parser can report. Callers treat the
/// response as absent; no partial list is ever returned alongside it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("malformed suggestion response: {reason}")]
pub struct ParseError {
    reason: String,
}

impl ParseError {
    /// Create a parse error with a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the response was rejected.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("invalid JSON: {err}"))
    }
}

/// Errors that can occur while fetching suggestions.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Suggestion endpoint answered with a non-success status.
    #[error("suggestion endpoint returned status {0}")]
    HttpStatus(u16),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    /// Suggestion URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No engine is registered under this name.
    #[error("unknown search engine: {0}")]
    UnknownEngine(String),

    /// The engine has no suggestion endpoint.
    #[error("search engine {0} does not provide suggestions")]
    SuggestionsUnsupported(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuggestionError {
    /// Check if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::HttpRequest(_))
            || matches!(self, Self::HttpStatus(status) if *status >= 500)
    }

    /// Get retry delay in seconds if applicable.
    #[must_use]
    pub const fn retry_delay(&self) -> Option<u64> {
        match self {
            Self::RateLimited(seconds) => Some(*seconds),
            Self::HttpRequest(_) => Some(2),
            Self::HttpStatus(status) if *status >= 500 => Some(5),
            _ => None,
        }
    }
}

/// Convenience result alias for suggestion operations.
pub type SuggestionResult<T> = Result<T, SuggestionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("missing key \"items\"");
        assert_eq!(
            err.to_string(),
            "malformed suggestion response: missing key \"items\""
        );
        assert_eq!(err.reason(), "missing key \"items\"");
    }

    #[test]
    fn test_parse_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").err();
        let err = json_err.map(ParseError::from);
        assert!(err.is_some_and(|e| e.reason().starts_with("invalid JSON")));
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err = SuggestionError::from(ParseError::new("bad shape"));
        assert_eq!(err.to_string(), "malformed suggestion response: bad shape");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retry_policy() {
        assert!(SuggestionError::RateLimited(30).is_retryable());
        assert_eq!(SuggestionError::RateLimited(30).retry_delay(), Some(30));
        assert!(SuggestionError::HttpStatus(503).is_retryable());
        assert!(!SuggestionError::HttpStatus(404).is_retryable());
        assert_eq!(SuggestionError::HttpStatus(404).retry_delay(), None);
        assert!(!SuggestionError::UnknownEngine("x".to_string()).is_retryable());
    }
}
