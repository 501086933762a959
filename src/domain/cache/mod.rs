//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::GatewayError;

/// Generic key-value cache with per-entry TTL
///
/// Raw operations work on JSON strings to stay dyn-compatible; use the
/// [`CacheExt`] helpers for typed access. Keys are opaque to implementations:
/// hashing and namespacing are the caller's concern. Expiry is enforced by
/// the backing store; there is deliberately no eviction policy beyond TTL
/// and capacity.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw JSON value, or `None` on miss or expiry
    async fn get_raw(&self, key: &str) -> Result<Option<String>, GatewayError>;

    /// Sets a raw JSON value with a TTL
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), GatewayError>;

    /// Deletes a value, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, GatewayError>;

    /// Deletes every key starting with `prefix`, returning how many were removed
    ///
    /// Scoped deletion exists so one namespace can be flushed without
    /// disturbing unrelated entries sharing the store.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, GatewayError>;

    /// Counts live entries under `prefix` and their total stored bytes
    ///
    /// An empty prefix covers the whole store.
    async fn prefix_stats(&self, prefix: &str) -> Result<PrefixStats, GatewayError>;
}

/// Entry count and payload size for a key prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefixStats {
    pub count: usize,
    pub size_bytes: u64,
}

/// Extension trait providing typed get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, GatewayError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        GatewayError::cache(format!("Failed to deserialize cache value: {}", e))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Sets a typed value in the cache with a TTL
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                GatewayError::cache(format!("Failed to serialize cache value: {}", e))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}
