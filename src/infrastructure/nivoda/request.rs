//! Outbound query request value and cache-key derivation

use serde::Deserialize;
use sha2::{Digest, Sha256};

/// An immutable GraphQL request, built once per call
///
/// Variables are sent as a structured payload alongside the document; they
/// are never spliced into the query text.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    document: &'static str,
    variables: serde_json::Value,
    cacheable: bool,
}

impl QueryRequest {
    pub fn new(document: &'static str, variables: serde_json::Value) -> Self {
        Self {
            document,
            variables,
            cacheable: true,
        }
    }

    /// Marks the request as never cached (diagnostic probes)
    pub fn uncacheable(mut self) -> Self {
        self.cacheable = false;
        self
    }

    pub fn document(&self) -> &str {
        self.document
    }

    pub fn variables(&self) -> &serde_json::Value {
        &self.variables
    }

    pub fn cacheable(&self) -> bool {
        self.cacheable
    }

    /// JSON body for the HTTP POST
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "query": self.document,
            "variables": self.variables,
        })
    }

    /// Deterministic content hash of `(document, variables)`
    ///
    /// serde_json object keys serialize in sorted (BTreeMap) order, so two
    /// variable payloads built in different key order hash identically.
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.document.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.variables.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlEnvelope {
    pub data: Option<serde_json::Value>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: Option<String>,
}

impl GraphqlEnvelope {
    /// First provider-reported error message, if the errors array is non-empty
    pub fn first_error_message(&self) -> Option<String> {
        self.errors.as_ref()?.first().map(|e| {
            e.message
                .clone()
                .unwrap_or_else(|| "Unknown GraphQL error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        let a = QueryRequest::new("query { x }", serde_json::json!({ "id": "d1" }));
        let b = QueryRequest::new("query { x }", serde_json::json!({ "id": "d1" }));

        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_cache_key_ignores_variable_construction_order() {
        let a = QueryRequest::new(
            "query { x }",
            serde_json::json!({ "limit": 20, "page": 0 }),
        );
        let b = QueryRequest::new(
            "query { x }",
            serde_json::json!({ "page": 0, "limit": 20 }),
        );

        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_cache_key_differs_per_document_and_variables() {
        let base = QueryRequest::new("query { x }", serde_json::json!({ "id": "d1" }));
        let other_doc = QueryRequest::new("query { y }", serde_json::json!({ "id": "d1" }));
        let other_vars = QueryRequest::new("query { x }", serde_json::json!({ "id": "d2" }));

        assert_ne!(base.cache_key(), other_doc.cache_key());
        assert_ne!(base.cache_key(), other_vars.cache_key());
    }

    #[test]
    fn test_body_carries_document_and_variables() {
        let request = QueryRequest::new("query { x }", serde_json::json!({ "id": "d1" }));
        let body = request.body();

        assert_eq!(body["query"], "query { x }");
        assert_eq!(body["variables"]["id"], "d1");
    }

    #[test]
    fn test_envelope_first_error_message() {
        let envelope: GraphqlEnvelope = serde_json::from_value(serde_json::json!({
            "errors": [
                { "message": "bad filter combination" },
                { "message": "second error" }
            ]
        }))
        .unwrap();

        assert_eq!(
            envelope.first_error_message().as_deref(),
            Some("bad filter combination")
        );
    }

    #[test]
    fn test_envelope_error_without_message_gets_fallback() {
        let envelope: GraphqlEnvelope =
            serde_json::from_value(serde_json::json!({ "errors": [{}] })).unwrap();

        assert_eq!(
            envelope.first_error_message().as_deref(),
            Some("Unknown GraphQL error")
        );
    }

    #[test]
    fn test_envelope_without_errors() {
        let envelope: GraphqlEnvelope =
            serde_json::from_value(serde_json::json!({ "data": { "x": 1 } })).unwrap();

        assert!(envelope.first_error_message().is_none());
    }
}
