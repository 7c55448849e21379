//! TTL cache for fetched suggestion lists.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::suggestions::config::CacheConfig;
use crate::suggestions::types::Suggestions;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    data: Suggestions,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Suggestions, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Identifies one engine/query/limit combination.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CacheKey {
    engine: String,
    limit: usize,
    query: String,
}

/// Thread-safe cache of suggestion lists keyed by engine, query and limit.
pub struct SuggestionCache {
    config: CacheConfig,
    entries: DashMap<CacheKey, CacheEntry>,
}

impl SuggestionCache {
    /// Create a new cache with the given configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
        }
    }

    /// Build the cache key for one engine/query/limit combination.
    #[must_use]
    pub fn key(engine: &str, query: &str, limit: usize) -> CacheKey {
        CacheKey {
            engine: engine.to_string(),
            limit,
            query: query.to_string(),
        }
    }

    /// Get a cached suggestion list.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Suggestions> {
        if !self.config.enabled {
            return None;
        }

        let hit = self.entries.get(key).map(|entry| {
            if entry.is_expired() {
                None
            } else {
                Some(entry.data.clone())
            }
        })?;

        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }
        hit
    }

    /// Cache a suggestion list.
    pub fn set(&self, key: &CacheKey, suggestions: &Suggestions) {
        if !self.config.enabled {
            return;
        }

        self.enforce_max_entries();

        let ttl = Duration::from_secs(self.config.ttl_seconds);
        self.entries
            .insert(key.clone(), CacheEntry::new(suggestions.clone(), ttl));
    }

    /// Clear the cache.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let expired = self.entries.iter().filter(|entry| entry.is_expired()).count();
        CacheStats {
            entries: self.entries.len(),
            expired,
        }
    }

    /// Remove expired entries.
    pub fn cleanup_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    /// Enforce maximum entries limit, dropping expired entries first.
    fn enforce_max_entries(&self) {
        let max_entries = self.config.max_entries.max(1);
        if self.entries.len() < max_entries {
            return;
        }

        self.cleanup_expired();

        if self.entries.len() >= max_entries {
            let to_remove = self.entries.len() - max_entries + 1;
            let keys: Vec<CacheKey> = self
                .entries
                .iter()
                .take(to_remove)
                .map(|entry| entry.key().clone())
                .collect();
            for key in keys {
                self.entries.remove(&key);
            }
        }
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    /// Number of stored entries, expired or not.
    pub entries: usize,
    /// Entries past their TTL that have not been evicted yet.
    pub expired: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(query: &str) -> Suggestions {
        Suggestions::new("Google", query, vec![format!("{query} one"), format!("{query} two")])
    }

    #[test]
    fn test_cache_roundtrip() {
        let cache = SuggestionCache::new(CacheConfig::default());
        let key = SuggestionCache::key("Google", "rust", 15);

        cache.set(&key, &sample("rust"));

        let cached = cache.get(&key);
        assert_eq!(cached.map(|s| s.suggestions.len()), Some(2));
        assert!(cache.get(&SuggestionCache::key("Google", "rust", 5)).is_none());
    }

    #[test]
    fn test_keys_with_separators_do_not_collide() {
        let cache = SuggestionCache::new(CacheConfig::default());
        let left = SuggestionCache::key("A:15", "x", 15);
        let right = SuggestionCache::key("A", "15:x", 15);
        assert_ne!(left, right);

        cache.set(&left, &sample("left"));
        cache.set(&right, &sample("right"));

        assert_eq!(cache.stats().entries, 2);
        assert_eq!(cache.get(&left).map(|s| s.query), Some("left".to_string()));
        assert_eq!(cache.get(&right).map(|s| s.query), Some("right".to_string()));
    }

    #[test]
    fn test_cache_disabled() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let cache = SuggestionCache::new(config);

        let key = SuggestionCache::key("Google", "rust", 15);
        cache.set(&key, &sample("rust"));

        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_expired_entries_are_evicted_on_read() {
        let config = CacheConfig {
            ttl_seconds: 0,
            ..CacheConfig::default()
        };
        let cache = SuggestionCache::new(config);

        let key = SuggestionCache::key("Google", "rust", 15);
        cache.set(&key, &sample("rust"));
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.stats().expired, 1);
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_cleanup_expired() {
        let config = CacheConfig {
            ttl_seconds: 0,
            ..CacheConfig::default()
        };
        let cache = SuggestionCache::new(config);

        cache.set(&SuggestionCache::key("Google", "a", 15), &sample("a"));
        cache.set(&SuggestionCache::key("Google", "b", 15), &sample("b"));
        std::thread::sleep(Duration::from_millis(5));
        cache.cleanup_expired();

        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_max_entries_is_enforced() {
        let config = CacheConfig {
            max_entries: 2,
            ..CacheConfig::default()
        };
        let cache = SuggestionCache::new(config);

        for query in ["a", "b", "c"] {
            cache.set(&SuggestionCache::key("Google", query, 15), &sample(query));
        }

        assert_eq!(cache.stats().entries, 2);
        assert!(cache.get(&SuggestionCache::key("Google", "c", 15)).is_some());
    }

    #[test]
    fn test_clear() {
        let cache = SuggestionCache::new(CacheConfig::default());
        cache.set(&SuggestionCache::key("Google", "a", 15), &sample("a"));
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
