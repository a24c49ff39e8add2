//! The catalog API surface: search for services, invoke one.
//!
//! This module pins the two logical tool operations to their HTTP routes and
//! timeouts. Dispatch and concurrency live in [`crate::toolkit`]; nothing
//! here knows about tool calls or batches.

use crate::config::{ApiConfig, BACKEND_API_ENDPOINT};
use crate::transport::{HttpTransport, RequestOptions};
use crate::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Timeout for service invocation. Invocations may run a long-lived
/// downstream action, so the budget is deliberately larger than search's.
pub const INVOKE_TIMEOUT: Duration = Duration::from_secs(50);

/// The two operations the dispatcher needs from the backend.
///
/// `Toolkit` consumes this as a trait object so tests can substitute an
/// in-memory catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search the catalog. `params` become URL query parameters.
    async fn search(&self, params: HashMap<String, String>) -> Result<Value>;

    /// Invoke a service previously returned by [`Catalog::search`].
    async fn invoke(&self, args: Value) -> Result<Value>;
}

/// HTTP-backed catalog client.
pub struct CatalogApi {
    transport: HttpTransport,
}

impl CatalogApi {
    /// Build a catalog client from a config. Falls back to
    /// [`BACKEND_API_ENDPOINT`] when the config has no endpoint override.
    pub fn new(config: ApiConfig) -> Self {
        let endpoint = config
            .endpoint
            .unwrap_or_else(|| BACKEND_API_ENDPOINT.to_string());
        Self {
            transport: HttpTransport::new(config.api_key, endpoint),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.base_url()
    }
}

#[async_trait]
impl Catalog for CatalogApi {
    async fn search(&self, params: HashMap<String, String>) -> Result<Value> {
        self.transport
            .execute(
                Method::GET,
                "/actions/search",
                RequestOptions::new().with_params(params),
            )
            .await
    }

    async fn invoke(&self, args: Value) -> Result<Value> {
        self.transport
            .execute(
                Method::POST,
                "/actions/call",
                RequestOptions::new()
                    .with_json(args)
                    .with_timeout(INVOKE_TIMEOUT),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let api = CatalogApi::new(ApiConfig::new("key"));
        assert_eq!(api.endpoint(), BACKEND_API_ENDPOINT);
    }

    #[test]
    fn test_endpoint_override() {
        let api = CatalogApi::new(
            ApiConfig::new("key").with_endpoint("http://localhost:4010"),
        );
        assert_eq!(api.endpoint(), "http://localhost:4010");
    }
}
