//! Namespaced caching of provider query responses

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::GatewayError;
use crate::domain::cache::{Cache, PrefixStats};

/// Configuration for query-response caching
#[derive(Debug, Clone)]
pub struct QueryCacheConfig {
    /// Namespace prefix for cache keys
    pub namespace: String,
    /// TTL applied to stored responses
    pub default_ttl: Duration,
    /// Whether caching is enabled at all
    pub enabled: bool,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            namespace: "nivoda:query".to_string(),
            default_ttl: Duration::from_secs(3600),
            enabled: true,
        }
    }
}

impl QueryCacheConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Outcome of a cache lookup
///
/// `Disabled` and `Miss` both send the pipeline to the network, but they are
/// kept distinct so tests and logs can tell "nothing cached" apart from
/// "caching turned off".
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(serde_json::Value),
    Miss,
    Disabled,
}

/// Cache statistics for the query namespace
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub count: usize,
    pub size_bytes: u64,
    pub enabled: bool,
    pub default_ttl_secs: u64,
}

/// Service wrapping a [`Cache`] with namespace, TTL and enable/disable policy
///
/// Caching is an optimization, never a correctness dependency: when disabled
/// every operation is a no-op, and backing-store errors degrade to misses
/// instead of failing the calling request.
#[derive(Debug)]
pub struct QueryCacheService {
    cache: Arc<dyn Cache>,
    config: QueryCacheConfig,
}

impl QueryCacheService {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self::with_config(cache, QueryCacheConfig::default())
    }

    pub fn with_config(cache: Arc<dyn Cache>, config: QueryCacheConfig) -> Self {
        Self { cache, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.config.namespace, key)
    }

    fn namespace_prefix(&self) -> String {
        format!("{}:", self.config.namespace)
    }

    /// Looks up a cached response payload by content-hash key
    pub async fn lookup(&self, key: &str) -> CacheLookup {
        if !self.config.enabled {
            return CacheLookup::Disabled;
        }

        let namespaced = self.namespaced(key);

        match self.cache.get_raw(&namespaced).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(key = %namespaced, "query cache hit");
                    CacheLookup::Hit(value)
                }
                Err(e) => {
                    warn!(key = %namespaced, error = %e, "discarding undeserializable cache entry");
                    let _ = self.cache.delete(&namespaced).await;
                    CacheLookup::Miss
                }
            },
            Ok(None) => {
                debug!(key = %namespaced, "query cache miss");
                CacheLookup::Miss
            }
            Err(e) => {
                warn!(key = %namespaced, error = %e, "cache lookup failed, treating as miss");
                CacheLookup::Miss
            }
        }
    }

    /// Stores a successful response payload under the given key
    pub async fn store(&self, key: &str, value: &serde_json::Value) {
        if !self.config.enabled {
            return;
        }

        let namespaced = self.namespaced(key);

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %namespaced, error = %e, "failed to serialize response for caching");
                return;
            }
        };

        if let Err(e) = self
            .cache
            .set_raw(&namespaced, &raw, self.config.default_ttl)
            .await
        {
            warn!(key = %namespaced, error = %e, "cache write failed");
        }
    }

    /// Removes every entry under this service's namespace
    pub async fn clear(&self) -> Result<usize, GatewayError> {
        if !self.config.enabled {
            return Ok(0);
        }

        self.cache.delete_prefix(&self.namespace_prefix()).await
    }

    /// Reports namespace-scoped cache statistics
    pub async fn stats(&self) -> Result<CacheStats, GatewayError> {
        let prefix_stats = if self.config.enabled {
            self.cache.prefix_stats(&self.namespace_prefix()).await?
        } else {
            PrefixStats::default()
        };

        Ok(CacheStats {
            count: prefix_stats.count,
            size_bytes: prefix_stats.size_bytes,
            enabled: self.config.enabled,
            default_ttl_secs: self.config.default_ttl.as_secs(),
        })
    }
}
