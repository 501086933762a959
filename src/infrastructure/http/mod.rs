//! HTTP transport used by the request pipeline

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::GatewayError;

/// A raw HTTP response, before any classification
///
/// The pipeline decides what a non-2xx status or an unparseable body means;
/// the transport only reports what came back.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP POST operations (for mocking)
///
/// Implementations return `Err` only for transport-level failures (timeout,
/// DNS, connection reset); any response from the server, whatever its
/// status, is returned as `Ok`.
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, GatewayError>;
}

/// Real HTTP client using reqwest
///
/// TLS verification stays at reqwest's default (enabled); requests carry a
/// bounded timeout so a stalled provider cannot hang callers.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, GatewayError> {
        (**self).post_json(url, headers, body).await
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, GatewayError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock HTTP client recording every call it receives
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, HttpResponse>>,
        transport_errors: RwLock<HashMap<String, String>>,
        calls: AtomicUsize,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
            self.responses.write().unwrap().insert(
                url.into(),
                HttpResponse {
                    status,
                    body: body.into(),
                },
            );
            self
        }

        pub fn with_json_response(self, url: impl Into<String>, body: serde_json::Value) -> Self {
            self.with_response(url, 200, body.to_string())
        }

        pub fn with_transport_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.transport_errors
                .write()
                .unwrap()
                .insert(url.into(), error.into());
            self
        }

        /// Number of requests this client has received
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            _body: &serde_json::Value,
        ) -> Result<HttpResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(error) = self.transport_errors.read().unwrap().get(url) {
                return Err(GatewayError::transport(error.clone()));
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| GatewayError::transport(format!("No mock response for {}", url)))
        }
    }
}
