//! Search service - the inbound surface for callers
//!
//! Wraps the request pipeline with pricing markup. Markup is applied here,
//! after cache/network resolution, so cached payloads always hold wholesale
//! prices.

use crate::domain::GatewayError;
use crate::domain::diamond::{ConnectionStatus, Diamond, DiamondMedia, Pagination, SearchPage};
use crate::domain::filter::{FilterOptions, FilterSet};
use crate::domain::pricing::PricingConfig;
use crate::infrastructure::cache::CacheStats;
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::nivoda::NivodaClient;

/// Diamond search and lookup with retail pricing applied
#[derive(Debug)]
pub struct DiamondSearchService<C: HttpClient> {
    client: NivodaClient<C>,
    pricing: PricingConfig,
}

impl<C: HttpClient> DiamondSearchService<C> {
    pub fn new(client: NivodaClient<C>, pricing: PricingConfig) -> Self {
        Self { client, pricing }
    }

    /// Searches the inventory; every priced result carries the configured markup
    pub async fn search(
        &self,
        filters: &FilterSet,
        pagination: Pagination,
        bypass_cache: bool,
    ) -> Result<SearchPage, GatewayError> {
        let page = self
            .client
            .search_diamonds(filters, pagination, !bypass_cache)
            .await?;

        Ok(self.pricing.apply_to_page(page))
    }

    /// Fetches a single stone with markup applied
    pub async fn get(
        &self,
        diamond_id: &str,
        bypass_cache: bool,
    ) -> Result<Diamond, GatewayError> {
        let diamond = self.client.get_diamond(diamond_id, !bypass_cache).await?;

        Ok(self.pricing.apply_to(diamond))
    }

    /// Fetches media links for a stone (no prices involved)
    pub async fn media(&self, diamond_id: &str) -> Result<DiamondMedia, GatewayError> {
        self.client.get_diamond_media(diamond_id).await
    }

    /// Probes API reachability
    pub async fn test_connection(&self) -> ConnectionStatus {
        self.client.test_connection().await
    }

    /// Static catalog of recognized filter values
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::provider_defaults()
    }

    /// Flushes this service's cached query responses
    pub async fn clear_cache(&self) -> Result<usize, GatewayError> {
        self.client.cache().clear().await
    }

    /// Cache statistics for the query namespace
    pub async fn cache_stats(&self) -> Result<CacheStats, GatewayError> {
        self.client.cache().stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::infrastructure::cache::{InMemoryCache, QueryCacheService};
    use crate::infrastructure::http::mock::MockHttpClient;
    use crate::infrastructure::nivoda::{DEFAULT_API_URL, NivodaConfig};

    fn service(
        http: Arc<MockHttpClient>,
        markup_percent: f64,
    ) -> DiamondSearchService<Arc<MockHttpClient>> {
        let config = NivodaConfig {
            api_key: "test-key".to_string(),
            min_request_interval: Duration::from_millis(1),
            ..NivodaConfig::default()
        };
        let cache = QueryCacheService::new(Arc::new(InMemoryCache::new()));
        let client = NivodaClient::with_http_client(http, config, cache);

        DiamondSearchService::new(client, PricingConfig::new(markup_percent))
    }

    fn search_response() -> serde_json::Value {
        serde_json::json!({
            "data": {
                "diamonds_by_query": {
                    "items": [
                        { "id": "dia-1", "price": 1000.0 },
                        { "id": "dia-2", "price": null }
                    ],
                    "total_count": 2,
                    "page_info": null
                }
            }
        })
    }

    #[tokio::test]
    async fn test_search_applies_markup_to_priced_items() {
        let http = Arc::new(MockHttpClient::new().with_json_response(DEFAULT_API_URL, search_response()));
        let service = service(http, 10.0);

        let page = service
            .search(&FilterSet::new(), Pagination::default(), false)
            .await
            .unwrap();

        assert_eq!(page.items[0].price, Some(1100.0));
        assert_eq!(page.items[0].original_price, Some(1000.0));
        assert_eq!(page.items[1].price, None);
    }

    #[tokio::test]
    async fn test_markup_change_does_not_require_cache_invalidation() {
        // Same backing client state; marked-up price derives from the cached
        // wholesale payload on every call.
        let http = Arc::new(MockHttpClient::new().with_json_response(DEFAULT_API_URL, search_response()));
        let service = service(http, 10.0);

        let first = service
            .search(&FilterSet::new(), Pagination::default(), false)
            .await
            .unwrap();
        let second = service
            .search(&FilterSet::new(), Pagination::default(), false)
            .await
            .unwrap();

        assert_eq!(first.items[0].original_price, Some(1000.0));
        assert_eq!(second.items[0].original_price, Some(1000.0));
    }

    #[tokio::test]
    async fn test_get_applies_markup() {
        let http = Arc::new(MockHttpClient::new().with_json_response(
            DEFAULT_API_URL,
            serde_json::json!({
                "data": { "diamond": { "id": "dia-1", "price": 500.0 } }
            }),
        ));
        let service = service(http, 20.0);

        let diamond = service.get("dia-1", false).await.unwrap();

        assert_eq!(diamond.price, Some(600.0));
        assert_eq!(diamond.original_price, Some(500.0));
    }

    #[tokio::test]
    async fn test_bypass_cache_flag_forces_network() {
        let http = Arc::new(MockHttpClient::new().with_json_response(DEFAULT_API_URL, search_response()));
        let service = service(http.clone(), 0.0);

        service
            .search(&FilterSet::new(), Pagination::default(), true)
            .await
            .unwrap();
        service
            .search(&FilterSet::new(), Pagination::default(), true)
            .await
            .unwrap();

        assert_eq!(http.call_count(), 2);

        // Nothing was written to the cache either
        assert_eq!(service.cache_stats().await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_cache_management_passthrough() {
        let http = Arc::new(MockHttpClient::new().with_json_response(DEFAULT_API_URL, search_response()));
        let service = service(http, 0.0);

        service
            .search(&FilterSet::new(), Pagination::default(), false)
            .await
            .unwrap();

        let stats = service.cache_stats().await.unwrap();
        assert_eq!(stats.count, 1);

        let cleared = service.clear_cache().await.unwrap();
        assert_eq!(cleared, 1);

        let stats = service.cache_stats().await.unwrap();
        assert_eq!(stats.count, 0);
    }

    #[tokio::test]
    async fn test_filter_options_catalog_is_exposed() {
        let service = service(Arc::new(MockHttpClient::new()), 0.0);

        assert!(service.filter_options().shapes.contains(&"Round"));
    }
}
