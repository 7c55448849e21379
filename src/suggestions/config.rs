//! Configuration for the suggestions module.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{SuggestionError, SuggestionResult};
use super::types::SearchEngine;

/// Default number of suggestions kept per engine.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 15;

/// Configuration for the suggestion service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
    /// Maximum number of suggestions returned per engine.
    pub max_suggestions: usize,
    /// User agents to rotate.
    pub user_agents: Vec<String>,
    /// Cache configuration.
    pub cache_config: CacheConfig,
    /// Engines added to (or overriding) the built-in list.
    pub engines: Vec<SearchEngine>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            user_agents: default_user_agents(),
            cache_config: CacheConfig::default(),
            engines: Vec::new(),
        }
    }
}

impl SuggestionConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> SuggestionResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| SuggestionError::Config(format!("invalid config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the maximum number of suggestions per engine.
    #[must_use]
    pub const fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Set the cache configuration.
    #[must_use]
    pub const fn with_cache(mut self, cache_config: CacheConfig) -> Self {
        self.cache_config = cache_config;
        self
    }

    /// Register an extra engine.
    #[must_use]
    pub fn with_engine(mut self, engine: SearchEngine) -> Self {
        self.engines.push(engine);
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> SuggestionResult<()> {
        if self.max_suggestions == 0 {
            return Err(SuggestionError::Config(
                "max_suggestions must be > 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(SuggestionError::Config(
                "request_timeout must be > 0".to_string(),
            ));
        }

        if self.cache_config.enabled && self.cache_config.max_entries == 0 {
            return Err(SuggestionError::Config(
                "cache_config.max_entries must be > 0 when the cache is enabled".to_string(),
            ));
        }

        for engine in &self.engines {
            if engine.name.trim().is_empty() {
                return Err(SuggestionError::Config(
                    "engine names must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get a random user agent from the rotation list.
    #[must_use]
    pub fn random_user_agent(&self) -> String {
        if self.user_agents.is_empty() {
            return default_user_agents()[0].clone();
        }
        let mut rng = rand::thread_rng();
        let idx = rng.gen_range(0..self.user_agents.len());
        self.user_agents[idx].clone()
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// TTL for suggestion lists (seconds).
    pub ttl_seconds: u64,
    /// Maximum cache size (number of entries).
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 300, // 5 minutes
            max_entries: 1000,
        }
    }
}

/// Default user agents for rotation.
fn default_user_agents() -> Vec<String> {
    vec![
        // Firefox on Windows
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
        // Firefox on macOS
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
        // Firefox on Linux
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
        // Firefox on Android
        "Mozilla/5.0 (Android 14; Mobile; rv:121.0) Gecko/121.0 Firefox/121.0".to_string(),
    ]
}

/// Serde module for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
