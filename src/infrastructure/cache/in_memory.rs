//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::GatewayError;
use crate::domain::cache::{Cache, PrefixStats};

/// Configuration for the in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries before moka starts evicting
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

/// Cache entry stored in moka
///
/// Expiry is tracked per entry; moka's cache-wide TTL cannot express
/// different TTLs for different keys.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: u64,
}

/// Thread-safe in-memory cache backed by moka
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        Self {
            cache: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Self::current_time_millis() > entry.expires_at
    }

    async fn live_entries(&self) -> Vec<(String, CacheEntry)> {
        self.cache.run_pending_tasks().await;

        self.cache
            .iter()
            .filter(|(_, entry)| !Self::is_expired(entry))
            .map(|(key, entry)| (key.as_ref().clone(), entry))
            .collect()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, GatewayError> {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    return Ok(None);
                }

                Ok(Some(entry.data))
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), GatewayError> {
        let entry = CacheEntry {
            data: value.to_string(),
            expires_at: Self::current_time_millis() + ttl.as_millis() as u64,
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, GatewayError> {
        let removed = self.cache.remove(key).await;
        Ok(removed.is_some_and(|entry| !Self::is_expired(&entry)))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, GatewayError> {
        let keys: Vec<String> = self
            .live_entries()
            .await
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(prefix))
            .collect();

        let mut deleted = 0;
        for key in keys {
            self.cache.remove(&key).await;
            deleted += 1;
        }

        Ok(deleted)
    }

    async fn prefix_stats(&self, prefix: &str) -> Result<PrefixStats, GatewayError> {
        let mut stats = PrefixStats::default();

        for (key, entry) in self.live_entries().await {
            if key.starts_with(prefix) {
                stats.count += 1;
                stats.size_bytes += entry.data.len() as u64;
            }
        }

        Ok(stats)
    }
}
