//! Search suggestion system.
//!
//! This module provides:
//! - Per-engine response parsers (`OpenSearch` arrays, keyed objects, Qwant)
//! - Suggestion URL templates and fetching
//! - Caching with TTL
//! - Concurrent fan-out across several engines

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod parsers;
pub mod types;

pub use cache::{CacheKey, CacheStats, SuggestionCache};
pub use client::{HttpFetcher, SuggestionClient, SuggestionFetcher};
pub use config::{CacheConfig, SuggestionConfig};
pub use error::{ParseError, SuggestionError, SuggestionResult};
pub use parsers::{ResponseParser, select_response_parser};
pub use types::{SearchEngine, Suggestions};

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;

/// Main suggestion service: engine registry, fetching and caching.
pub struct SuggestionService {
    config: SuggestionConfig,
    engines: HashMap<String, SearchEngine>,
    fetcher: Arc<dyn SuggestionFetcher>,
    cache: SuggestionCache,
}

impl SuggestionService {
    /// Create a new suggestion service with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: SuggestionConfig) -> SuggestionResult<Self> {
        let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Create a new suggestion service with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> SuggestionResult<Self> {
        Self::new(SuggestionConfig::default())
    }

    /// Create a service that fetches through `fetcher`.
    ///
    /// Built-in engines are registered first; engines from the config
    /// replace built-ins of the same name.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn with_fetcher(
        config: SuggestionConfig,
        fetcher: Arc<dyn SuggestionFetcher>,
    ) -> SuggestionResult<Self> {
        config.validate()?;

        let engines = types::builtin_engines()
            .into_iter()
            .chain(config.engines.iter().cloned())
            .map(|engine| (engine.name.clone(), engine))
            .collect();
        let cache = SuggestionCache::new(config.cache_config.clone());

        Ok(Self {
            config,
            engines,
            fetcher,
            cache,
        })
    }

    /// Look up a registered engine by name.
    #[must_use]
    pub fn engine(&self, name: &str) -> Option<&SearchEngine> {
        self.engines.get(name)
    }

    /// Registered engines, sorted by name.
    #[must_use]
    pub fn engines(&self) -> Vec<&SearchEngine> {
        let mut engines: Vec<&SearchEngine> = self.engines.values().collect();
        engines.sort_by(|a, b| a.name.cmp(&b.name));
        engines
    }

    /// Fetch suggestions for `query` from one registered engine.
    ///
    /// # Errors
    /// Returns an error if the engine is unknown, has no suggestion
    /// endpoint, or the fetch or parse fails.
    pub async fn suggest(&self, engine_name: &str, query: &str) -> SuggestionResult<Suggestions> {
        let engine = self
            .engine(engine_name)
            .ok_or_else(|| SuggestionError::UnknownEngine(engine_name.to_string()))?;

        let limit = self.config.max_suggestions;
        let cache_key = SuggestionCache::key(&engine.name, query, limit);
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("Cache hit for suggestions: {engine_name}");
            return Ok(cached);
        }

        let client = SuggestionClient::new(engine.clone(), Arc::clone(&self.fetcher)).with_limit(limit);
        let suggestions = Suggestions::new(&engine.name, query, client.get_suggestions(query).await?);

        if !query.trim().is_empty() {
            self.cache.set(&cache_key, &suggestions);
        }

        Ok(suggestions)
    }

    /// Fetch suggestions from several engines concurrently.
    ///
    /// Engines that fail are logged and left out of the result; the
    /// remaining lists keep the order of `engine_names`.
    pub async fn suggest_all<S: AsRef<str> + Sync>(&self, engine_names: &[S], query: &str) -> Vec<Suggestions> {
        let requests = engine_names.iter().map(|name| {
            let name = name.as_ref();
            async move { (name, self.suggest(name, query).await) }
        });

        join_all(requests)
            .await
            .into_iter()
            .filter_map(|(name, result)| match result {
                Ok(suggestions) => Some(suggestions),
                Err(e) => {
                    tracing::warn!("Suggestions from {name} failed: {e}");
                    None
                }
            })
            .collect()
    }

    /// Parse a raw response with the parser selected for `engine_name`.
    ///
    /// The engine does not have to be registered.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the response is malformed.
    pub fn parse_raw(engine_name: &str, raw: &str) -> Result<Vec<String>, ParseError> {
        select_response_parser(engine_name).parse(raw)
    }

    /// Get cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear all caches.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
