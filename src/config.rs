//! Endpoint defaults and API configuration.

use std::env;

/// Public frontend API endpoint.
pub const FRONTEND_API_ENDPOINT: &str = "https://api.toolnet.io";

/// Backend API endpoint used by the tools surface.
pub const BACKEND_API_ENDPOINT: &str = "https://backend.toolnet.io/api/v1";

/// Backend websocket endpoint (not used by the tools surface).
pub const BACKEND_WS_ENDPOINT: &str = "wss://backend.toolnet.io/ws";

/// Transaction builder endpoint.
pub const TRANSACTION_API_ENDPOINT: &str = "https://txbuilder.toolnet.io/api";

/// Configuration for an API client: agent key plus an optional endpoint
/// override. Shared read-only by every request once the client is built.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Agent API key, sent as the `Authorization` header.
    pub api_key: String,
    /// Endpoint override. Consumers fall back to their own default
    /// (the tools surface uses [`BACKEND_API_ENDPOINT`]) when unset.
    pub endpoint: Option<String>,
}

impl ApiConfig {
    /// Create a config with the given API key and the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
        }
    }

    /// Override the endpoint this config points at.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Resolve the API key from the `TOOLNET_API_KEY` environment variable.
    /// Returns `None` when the variable is unset or empty.
    pub fn from_env() -> Option<Self> {
        let key = env::var("TOOLNET_API_KEY").ok()?;
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_is_unset() {
        let config = ApiConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let config = ApiConfig::new("key").with_endpoint("http://localhost:4010");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4010"));
    }
}
