//! Fetching suggestions from a search engine's suggestion endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use url::Url;

use crate::suggestions::config::{DEFAULT_MAX_SUGGESTIONS, SuggestionConfig};
use crate::suggestions::error::SuggestionError;
use crate::suggestions::parsers::ResponseParser;
use crate::suggestions::types::SearchEngine;

/// Fallback delay when a rate-limited response has no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Downloads the raw body of a suggestion endpoint.
#[async_trait]
pub trait SuggestionFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text.
    ///
    /// # Errors
    /// Returns an error if the request fails or the endpoint does not
    /// answer with a success status.
    async fn fetch(&self, url: &Url) -> Result<String, SuggestionError>;
}

/// [`SuggestionFetcher`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Wrap an existing HTTP client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build an HTTP client with appropriate headers and settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &SuggestionConfig) -> Result<Self, SuggestionError> {
        use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

        let mut headers = HeaderMap::new();

        let ua = config.random_user_agent();
        if let Ok(ua_value) = HeaderValue::from_str(&ua) {
            headers.insert(USER_AGENT, ua_value);
        }

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, application/x-suggestions+json, */*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| SuggestionError::HttpClient(e.to_string()))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl SuggestionFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, SuggestionError> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(SuggestionError::RateLimited(retry_after));
        }

        if !status.is_success() {
            return Err(SuggestionError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Fetches and parses suggestions for a single search engine.
pub struct SuggestionClient {
    engine: SearchEngine,
    parser: ResponseParser,
    fetcher: Arc<dyn SuggestionFetcher>,
    limit: usize,
}

impl SuggestionClient {
    /// Create a client for `engine`; the parser is selected from its name.
    #[must_use]
    pub fn new(engine: SearchEngine, fetcher: Arc<dyn SuggestionFetcher>) -> Self {
        let parser = engine.response_parser();
        Self {
            engine,
            parser,
            fetcher,
            limit: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Cap the number of suggestions returned.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The engine this client queries.
    #[must_use]
    pub const fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// The parser applied to responses.
    #[must_use]
    pub const fn parser(&self) -> ResponseParser {
        self.parser
    }

    /// Fetch suggestions for `query`.
    ///
    /// A blank query yields an empty list without touching the network.
    ///
    /// # Errors
    /// Returns an error if the engine has no suggestion endpoint, the fetch
    /// fails, or the response cannot be parsed.
    pub async fn get_suggestions(&self, query: &str) -> Result<Vec<String>, SuggestionError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = self.engine.build_suggestions_url(query)?;
        tracing::debug!(engine = %self.engine.name, parser = %self.parser, "Fetching suggestions");

        let body = self.fetcher.fetch(&url).await?;
        let mut suggestions = self.parser.parse(&body)?;
        suggestions.truncate(self.limit);

        if suggestions.is_empty() {
            tracing::debug!(engine = %self.engine.name, "Suggestion endpoint returned no entries");
        }

        Ok(suggestions)
    }
}
