//! Cache infrastructure - Cache implementations

mod in_memory;
mod query_cache;

pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use query_cache::{CacheLookup, CacheStats, QueryCacheConfig, QueryCacheService};
