//! Diamond Gateway
//!
//! A client library for the Nivoda diamond-inventory GraphQL API with
//! support for:
//! - Declarative filter sets compiled into provider query filters
//! - Cached, rate-limited request execution
//! - Configurable retail markup applied to provider prices

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::GatewayError;
use infrastructure::{
    cache::{InMemoryCache, InMemoryCacheConfig, QueryCacheService},
    http::ReqwestClient,
    nivoda::NivodaClient,
    services::DiamondSearchService,
};

/// Builds the full search pipeline from application configuration
///
/// Wires an in-memory cache, the query-cache layer, the Nivoda client and
/// the pricing transform together the way the `ndc` binary uses them.
pub fn create_service(
    config: &AppConfig,
) -> Result<DiamondSearchService<ReqwestClient>, GatewayError> {
    let cache = Arc::new(InMemoryCache::with_config(InMemoryCacheConfig {
        max_capacity: config.cache.max_capacity,
    }));
    let query_cache = QueryCacheService::with_config(cache, config.query_cache_config());
    let client = NivodaClient::new(config.nivoda_config(), query_cache)?;

    Ok(DiamondSearchService::new(client, config.pricing_config()))
}
