//! Cached, throttled request pipeline against the Nivoda GraphQL API

use std::time::Duration;

use tracing::{debug, error};

use crate::domain::diamond::{ConnectionStatus, Diamond, DiamondMedia, Pagination, SearchPage};
use crate::domain::filter::FilterSet;
use crate::domain::GatewayError;
use crate::infrastructure::cache::{CacheLookup, QueryCacheService};
use crate::infrastructure::http::{HttpClient, ReqwestClient};

use super::queries;
use super::request::{GraphqlEnvelope, QueryRequest};
use super::throttle::RequestThrottle;

pub const DEFAULT_API_URL: &str = "https://api.nivoda.net/graphql";

/// Connection settings for the Nivoda API
#[derive(Debug, Clone)]
pub struct NivodaConfig {
    pub api_url: String,
    pub api_key: String,
    /// Bound on each network call
    pub timeout: Duration,
    /// Minimum spacing between consecutive outbound requests
    pub min_request_interval: Duration,
}

impl Default for NivodaConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            min_request_interval: Duration::from_millis(100),
        }
    }
}

/// Client for the Nivoda diamond-inventory API
///
/// Every call flows through [`execute`](Self::execute): credential check,
/// cache lookup, throttle, network call, outcome classification, cache
/// write. Identical concurrent cache misses each go to the network; callers
/// needing request coalescing must provide it themselves.
#[derive(Debug)]
pub struct NivodaClient<C: HttpClient> {
    http: C,
    config: NivodaConfig,
    cache: QueryCacheService,
    throttle: RequestThrottle,
}

impl NivodaClient<ReqwestClient> {
    pub fn new(config: NivodaConfig, cache: QueryCacheService) -> Result<Self, GatewayError> {
        let http = ReqwestClient::new(config.timeout)?;
        Ok(Self::with_http_client(http, config, cache))
    }
}

impl<C: HttpClient> NivodaClient<C> {
    pub fn with_http_client(http: C, config: NivodaConfig, cache: QueryCacheService) -> Self {
        let throttle = RequestThrottle::new(config.min_request_interval);

        Self {
            http,
            config,
            cache,
            throttle,
        }
    }

    /// The query cache backing this client, for flush/stats operations
    pub fn cache(&self) -> &QueryCacheService {
        &self.cache
    }

    /// Executes a GraphQL request and returns the `data` payload
    ///
    /// A cache hit short-circuits before the throttle; the throttle wait is
    /// only paid on the network path. Successful payloads are stored
    /// pre-markup so pricing changes never require invalidation.
    pub async fn execute(
        &self,
        request: &QueryRequest,
        use_cache: bool,
    ) -> Result<serde_json::Value, GatewayError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GatewayError::configuration(
                "Nivoda API key is not configured",
            ));
        }

        let cache_key = request.cache_key();
        let cacheable = use_cache && request.cacheable();

        if cacheable
            && let CacheLookup::Hit(data) = self.cache.lookup(&cache_key).await
        {
            return Ok(data);
        }

        self.throttle.acquire().await;

        debug!(url = %self.config.api_url, "sending GraphQL request");

        let authorization = format!("Bearer {}", self.config.api_key);
        let headers = vec![("Authorization", authorization.as_str())];

        let response = self
            .http
            .post_json(&self.config.api_url, headers, &request.body())
            .await
            .inspect_err(|e| error!(error = %e, "Nivoda request failed at transport level"))?;

        if !response.is_success() {
            error!(
                status = response.status,
                body_len = response.body.len(),
                "Nivoda API returned non-success status"
            );
            return Err(GatewayError::http(response.status));
        }

        let envelope: GraphqlEnvelope = serde_json::from_str(&response.body).map_err(|e| {
            error!(
                body_len = response.body.len(),
                error = %e,
                "Nivoda API response was not valid JSON"
            );
            GatewayError::parse("Invalid JSON response from API")
        })?;

        if let Some(message) = envelope.first_error_message() {
            error!(message = %message, "Nivoda API reported a GraphQL error");
            return Err(GatewayError::provider(message));
        }

        let data = envelope.data.ok_or_else(|| {
            error!(
                body_len = response.body.len(),
                "Nivoda API response contained neither data nor errors"
            );
            GatewayError::parse("API response is missing the data payload")
        })?;

        if cacheable {
            self.cache.store(&cache_key, &data).await;
        }

        Ok(data)
    }

    /// Searches the remote inventory with compiled filters
    pub async fn search_diamonds(
        &self,
        filters: &FilterSet,
        pagination: Pagination,
        use_cache: bool,
    ) -> Result<SearchPage, GatewayError> {
        let compiled = filters.compile()?;

        let variables = serde_json::json!({
            "filters": compiled,
            "page": pagination.offset(),
            "limit": pagination.limit,
        });

        let request = QueryRequest::new(queries::SEARCH_DIAMONDS, variables);
        let data = self.execute(&request, use_cache).await?;

        extract(&data, "diamonds_by_query")
    }

    /// Fetches a single stone by provider id
    pub async fn get_diamond(
        &self,
        diamond_id: &str,
        use_cache: bool,
    ) -> Result<Diamond, GatewayError> {
        let request = QueryRequest::new(
            queries::GET_DIAMOND,
            serde_json::json!({ "id": diamond_id }),
        );
        let data = self.execute(&request, use_cache).await?;

        if data.get("diamond").is_none_or(|d| d.is_null()) {
            return Err(GatewayError::provider("Diamond not found"));
        }

        extract(&data, "diamond")
    }

    /// Fetches the image/video/certificate summary for a stone
    pub async fn get_diamond_media(&self, diamond_id: &str) -> Result<DiamondMedia, GatewayError> {
        let request = QueryRequest::new(
            queries::GET_DIAMOND_MEDIA,
            serde_json::json!({ "id": diamond_id }),
        );
        let data = self.execute(&request, true).await?;

        if data.get("diamond").is_none_or(|d| d.is_null()) {
            return Err(GatewayError::provider("Diamond not found"));
        }

        extract(&data, "diamond")
    }

    /// Probes the API with a one-item query, bypassing the cache
    ///
    /// Failures are folded into the status rather than returned as errors;
    /// this is a diagnostic, not a data call.
    pub async fn test_connection(&self) -> ConnectionStatus {
        let request =
            QueryRequest::new(queries::TEST_CONNECTION, serde_json::json!({})).uncacheable();

        match self.execute(&request, false).await {
            Ok(data) => {
                let total_count = data
                    .get("diamonds_by_query")
                    .and_then(|q| q.get("total_count"))
                    .and_then(|c| c.as_u64());

                match total_count {
                    Some(count) => ConnectionStatus {
                        connected: true,
                        total_count: Some(count),
                        message: format!("Connected successfully. {} diamonds available.", count),
                    },
                    None => ConnectionStatus {
                        connected: false,
                        total_count: None,
                        message: "Unexpected response shape from API".to_string(),
                    },
                }
            }
            Err(e) => ConnectionStatus {
                connected: false,
                total_count: None,
                message: e.to_string(),
            },
        }
    }
}

fn extract<T: serde::de::DeserializeOwned>(
    data: &serde_json::Value,
    field: &str,
) -> Result<T, GatewayError> {
    let value = data
        .get(field)
        .ok_or_else(|| GatewayError::parse(format!("API response is missing '{}'", field)))?;

    serde_json::from_value(value.clone())
        .map_err(|e| GatewayError::parse(format!("Unexpected shape for '{}': {}", field, e)))
}
