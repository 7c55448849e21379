//! Core types for search suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::suggestions::error::SuggestionError;
use crate::suggestions::parsers::{ResponseParser, select_response_parser};

/// Placeholder replaced by the encoded query in suggestion URL templates.
pub const SEARCH_TERMS_PLACEHOLDER: &str = "{searchTerms}";

/// A search engine, identified by its display name.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Display name; also selects the response parser.
    pub name: String,
    /// Suggestion endpoint containing a `{searchTerms}` placeholder.
    #[serde(default)]
    pub suggest_url: Option<String>,
}

impl SearchEngine {
    /// Create an engine without a suggestion endpoint.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suggest_url: None,
        }
    }

    /// Set the suggestion URL template.
    #[must_use]
    pub fn with_suggest_url(mut self, template: impl Into<String>) -> Self {
        self.suggest_url = Some(template.into());
        self
    }

    /// Whether this engine has a suggestion endpoint.
    #[must_use]
    pub const fn can_provide_suggestions(&self) -> bool {
        self.suggest_url.is_some()
    }

    /// Parser for this engine's suggestion responses.
    #[must_use]
    pub fn response_parser(&self) -> ResponseParser {
        select_response_parser(&self.name)
    }

    /// Build the suggestion URL for `query`.
    ///
    /// # Errors
    /// Returns an error if the engine has no suggestion endpoint or the
    /// expanded template is not a valid absolute URL.
    pub fn build_suggestions_url(&self, query: &str) -> Result<Url, SuggestionError> {
        let template = self
            .suggest_url
            .as_deref()
            .ok_or_else(|| SuggestionError::SuggestionsUnsupported(self.name.clone()))?;

        let expanded = template.replace(SEARCH_TERMS_PLACEHOLDER, &urlencoding::encode(query));
        Ok(Url::parse(&expanded)?)
    }
}

/// Suggestions returned by one engine for one query.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suggestions {
    /// Name of the engine that produced the list.
    pub engine: String,
    /// The query the suggestions complete.
    pub query: String,
    /// Suggestions in the order the engine returned them.
    pub suggestions: Vec<String>,
    /// When the list was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl Suggestions {
    /// Wrap a freshly fetched list.
    #[must_use]
    pub fn new(engine: impl Into<String>, query: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            engine: engine.into(),
            query: query.into(),
            suggestions,
            fetched_at: Utc::now(),
        }
    }

    /// Number of suggestions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Engines with a known suggestion endpoint.
#[must_use]
pub fn builtin_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine::new("Google")
            .with_suggest_url("https://www.google.com/complete/search?client=firefox&q={searchTerms}"),
        SearchEngine::new("Bing")
            .with_suggest_url("https://www.bing.com/osjson.aspx?query={searchTerms}"),
        SearchEngine::new("DuckDuckGo")
            .with_suggest_url("https://ac.duckduckgo.com/ac/?q={searchTerms}&type=list"),
        SearchEngine::new("Wikipedia").with_suggest_url(
            "https://en.wikipedia.org/w/api.php?action=opensearch&search={searchTerms}",
        ),
        SearchEngine::new("Qwant")
            .with_suggest_url("https://api.qwant.com/api/suggest/?q={searchTerms}"),
    ]
}
