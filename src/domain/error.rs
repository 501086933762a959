use thiserror::Error;

/// Core gateway errors
///
/// Every variant carries a non-empty, human-readable message that is safe to
/// surface to an end user. Diagnostic detail (status codes, body sizes) is
/// logged at the point of failure, not embedded here.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("API returned status code {status}")]
    Http { status: u16 },

    #[error("Invalid response from API: {message}")]
    Parse { message: String },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http(status: u16) -> Self {
        Self::Http { status }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether a caller could reasonably retry the failed call
    ///
    /// Transport failures are the only retryable class; parse failures are
    /// likely deterministic and configuration/validation failures need a fix,
    /// not a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = GatewayError::configuration("Nivoda API key is not configured");
        assert_eq!(
            error.to_string(),
            "Configuration error: Nivoda API key is not configured"
        );
    }

    #[test]
    fn test_http_error_includes_status() {
        let error = GatewayError::http(503);
        assert_eq!(error.to_string(), "API returned status code 503");
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(GatewayError::transport("connection reset").is_retryable());
        assert!(!GatewayError::http(500).is_retryable());
        assert!(!GatewayError::parse("unexpected EOF").is_retryable());
        assert!(!GatewayError::configuration("missing key").is_retryable());
    }

    #[test]
    fn test_messages_are_non_empty() {
        let errors = vec![
            GatewayError::validation("carat range is inverted"),
            GatewayError::provider("bad filter combination"),
            GatewayError::cache("serialization failed"),
            GatewayError::internal("unreachable state"),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
