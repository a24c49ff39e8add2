use crate::Result;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Timeout applied when a request does not specify its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-request options. Constructed for a single call, never reused.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Deadline for the whole request; defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Extra request headers. May override the `Authorization` header.
    pub headers: HashMap<String, String>,
    /// Query parameters, appended to the resolved URL.
    pub params: HashMap<String, String>,
    /// JSON request body. Setting one also sets the JSON content type.
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Errors raised while building or sending a request, before any HTTP
/// status is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to parse URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to serialize request body: {0}")]
    Body(#[source] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP executor shared by every API surface of the SDK.
///
/// Holds the agent key and base URL; both are read-only after construction.
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a single request and decode the response body as JSON.
    ///
    /// - `options.timeout` bounds the whole call (default 10 s).
    /// - `options.params` are appended as query parameters, keys in sorted
    ///   order so encoded URLs are stable.
    /// - `options.json` becomes the request payload and sets
    ///   `Content-Type: application/json`.
    /// - `Authorization` is set from the configured key unless the caller's
    ///   headers already carry one; caller headers win for that field.
    ///
    /// Failures to build the URL, serialize the body, or complete the call
    /// surface as [`TransportError`]. A non-2xx status surfaces as
    /// [`crate::Error::HttpStatus`] with the body read best-effort. A body
    /// that is not valid JSON surfaces as [`crate::Error::Decode`].
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value> {
        let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(TransportError::Url)?;
        if !options.params.is_empty() {
            let mut params: Vec<_> = options.params.iter().collect();
            params.sort();
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self.client.request(method.clone(), url.clone()).timeout(timeout);

        if let Some(body) = &options.json {
            let payload = serde_json::to_vec(body).map_err(TransportError::Body)?;
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let caller_sets_auth = options
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("authorization"));
        if !self.api_key.is_empty() && !caller_sets_auth {
            request = request.header(reqwest::header::AUTHORIZATION, &self.api_key);
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        debug!(%method, url = %url, "dispatching request");
        let response = request.send().await.map_err(TransportError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(TransportError::Http)?;
        let value: Value = serde_json::from_slice(&bytes).map_err(crate::Error::Decode)?;
        debug!(status = status.as_u16(), "request completed");
        Ok(value)
    }
}
