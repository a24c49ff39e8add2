//! Tool descriptors and the bounded-concurrency dispatcher.
//!
//! [`Toolkit`] is the piece the model orchestration loop talks to: it hands
//! out the two tool descriptors, normalizes whatever argument encoding the
//! model produced, routes each call to the catalog, and fans a batch of
//! calls out with bounded concurrency. Every call in a batch yields exactly
//! one [`ToolResult`], failures included.

mod descriptors;

pub use descriptors::{CALL_TOOL, SEARCH_TOOLS};

use crate::catalog::{Catalog, CatalogApi};
use crate::config::ApiConfig;
use crate::types::tool::{ToolArguments, ToolCall, ToolDefinition, ToolResult};
use crate::{Error, Result};
use futures::StreamExt;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Dispatcher for the two-function tool-calling contract.
pub struct Toolkit {
    catalog: Arc<dyn Catalog>,
    concurrency: usize,
    definitions: Vec<ToolDefinition>,
}

impl Toolkit {
    /// Start building a toolkit.
    pub fn builder() -> ToolkitBuilder {
        ToolkitBuilder::new()
    }

    /// The two fixed tool descriptors, in stable order (search, invoke).
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Call a single tool by name.
    ///
    /// String-encoded arguments are parsed as a JSON object
    /// ([`Error::ArgumentDecode`] on failure); structured arguments are used
    /// as-is. An unrecognized name fails with [`Error::UnknownTool`] without
    /// touching the network.
    pub async fn call_tool(&self, name: &str, args: ToolArguments) -> Result<Value> {
        let object = match args {
            ToolArguments::Raw(raw) => serde_json::from_str::<Map<String, Value>>(&raw)
                .map_err(Error::ArgumentDecode)?,
            ToolArguments::Structured(object) => object,
        };

        match name {
            SEARCH_TOOLS => {
                // The search endpoint takes string-typed query parameters.
                let params: HashMap<String, String> = object
                    .into_iter()
                    .map(|(key, value)| (key, stringify(value)))
                    .collect();
                self.catalog.search(params).await
            }
            CALL_TOOL => self.catalog.invoke(Value::Object(object)).await,
            other => Err(Error::UnknownTool(other.to_string())),
        }
    }

    /// Dispatch a batch of tool calls with bounded concurrency.
    ///
    /// At most the configured `concurrency` calls are in flight at any
    /// instant; the rest queue until a slot frees. The returned batch holds
    /// exactly one result per input call, in completion order, so callers
    /// must correlate by `tool_call_id`. A failing call never fails the batch:
    /// its result content becomes `{"error": <message>}` and sibling calls
    /// proceed untouched.
    pub async fn call_tools(&self, calls: Vec<ToolCall>) -> Vec<ToolResult> {
        if calls.is_empty() {
            return Vec::new();
        }

        futures::stream::iter(calls.into_iter().map(|call| {
            let ToolCall {
                id,
                name,
                arguments,
            } = call;
            async move {
                let content = match self.call_tool(&name, arguments).await {
                    Ok(value) => serde_json::to_string(&value).unwrap_or_else(|err| {
                        json!({ "error": err.to_string() }).to_string()
                    }),
                    Err(err) => {
                        warn!(call_id = %id, tool = %name, error = %err, "tool call failed");
                        json!({ "error": err.to_string() }).to_string()
                    }
                };
                ToolResult {
                    tool_call_id: id,
                    content,
                }
            }
        }))
        .buffer_unordered(self.concurrency)
        .collect()
        .await
    }
}

/// Render a JSON value as a search parameter. Strings contribute their bare
/// content; everything else its JSON text.
fn stringify(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Builder for [`Toolkit`].
pub struct ToolkitBuilder {
    api_key: String,
    endpoint: Option<String>,
    concurrency: usize,
    catalog: Option<Arc<dyn Catalog>>,
}

impl ToolkitBuilder {
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            endpoint: None,
            concurrency: 1,
            catalog: None,
        }
    }

    /// Set the agent API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Override the backend endpoint, e.g. to point at a mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Maximum number of tool calls in flight at once. Clamped to at
    /// least 1; fixed for the life of the toolkit.
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Substitute the catalog backend. Used by tests; production code wants
    /// the default HTTP-backed catalog.
    pub fn catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the toolkit.
    pub fn build(self) -> Toolkit {
        let catalog = self.catalog.unwrap_or_else(|| {
            let mut config = ApiConfig::new(self.api_key);
            if let Some(endpoint) = self.endpoint {
                config = config.with_endpoint(endpoint);
            }
            Arc::new(CatalogApi::new(config))
        });
        Toolkit {
            catalog,
            concurrency: self.concurrency.max(1),
            definitions: descriptors::definitions(),
        }
    }
}

impl Default for ToolkitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory catalog that records traffic and tracks peak concurrency.
    #[derive(Default)]
    struct RecordingCatalog {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        requests: AtomicUsize,
        searches: Mutex<Vec<HashMap<String, String>>>,
        invocations: Mutex<Vec<Value>>,
        fail_on_action: Option<String>,
        delay: Option<Duration>,
    }

    impl RecordingCatalog {
        async fn enter(&self) {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn exit(&self) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Catalog for RecordingCatalog {
        async fn search(&self, params: HashMap<String, String>) -> Result<Value> {
            self.enter().await;
            self.searches.lock().unwrap().push(params);
            self.exit();
            Ok(json!({ "actions": [] }))
        }

        async fn invoke(&self, args: Value) -> Result<Value> {
            self.enter().await;
            let failing = self
                .fail_on_action
                .as_deref()
                .is_some_and(|action| args["action"] == action);
            self.invocations.lock().unwrap().push(args);
            self.exit();
            if failing {
                return Err(Error::HttpStatus {
                    status: 502,
                    body: "upstream unavailable".to_string(),
                });
            }
            Ok(json!({ "status": "ok" }))
        }
    }

    fn toolkit_with(catalog: Arc<RecordingCatalog>, concurrency: usize) -> Toolkit {
        Toolkit::builder()
            .catalog(catalog)
            .concurrency(concurrency)
            .build()
    }

    fn search_call(id: &str, arguments: ToolArguments) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            name: SEARCH_TOOLS.to_string(),
            arguments,
        }
    }

    #[tokio::test]
    async fn test_empty_batch_is_empty_and_silent() {
        let catalog = Arc::new(RecordingCatalog::default());
        let toolkit = toolkit_with(catalog.clone(), 4);
        let results = toolkit.call_tools(Vec::new()).await;
        assert!(results.is_empty());
        assert_eq!(catalog.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_batch_yields_one_result_per_call() {
        let catalog = Arc::new(RecordingCatalog {
            fail_on_action: Some("svc.broken".to_string()),
            ..Default::default()
        });
        let toolkit = toolkit_with(catalog, 2);

        let calls = vec![
            search_call("call_1", r#"{"query":"weather"}"#.into()),
            ToolCall {
                id: "call_2".to_string(),
                name: CALL_TOOL.to_string(),
                arguments: r#"{"action":"svc.broken","payload":"{}"}"#.into(),
            },
            ToolCall {
                id: "call_3".to_string(),
                name: "does_not_exist".to_string(),
                arguments: r#"{}"#.into(),
            },
        ];

        let results = toolkit.call_tools(calls).await;
        assert_eq!(results.len(), 3);

        let ids: HashSet<_> = results.iter().map(|r| r.tool_call_id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["call_1", "call_2", "call_3"]));
    }

    #[tokio::test]
    async fn test_failures_become_error_content() {
        let catalog = Arc::new(RecordingCatalog {
            fail_on_action: Some("svc.broken".to_string()),
            ..Default::default()
        });
        let toolkit = toolkit_with(catalog, 2);

        let results = toolkit
            .call_tools(vec![
                ToolCall {
                    id: "ok".to_string(),
                    name: CALL_TOOL.to_string(),
                    arguments: r#"{"action":"svc.fine","payload":"{}"}"#.into(),
                },
                ToolCall {
                    id: "bad".to_string(),
                    name: CALL_TOOL.to_string(),
                    arguments: r#"{"action":"svc.broken","payload":"{}"}"#.into(),
                },
            ])
            .await;

        for result in results {
            let content: Value = serde_json::from_str(&result.content).unwrap();
            match result.tool_call_id.as_str() {
                "ok" => assert_eq!(content["status"], "ok"),
                "bad" => {
                    let message = content["error"].as_str().unwrap();
                    assert!(message.contains("502"), "unexpected message: {message}");
                }
                other => panic!("unexpected id {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_cap() {
        let catalog = Arc::new(RecordingCatalog {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let toolkit = toolkit_with(catalog.clone(), 3);

        let calls = (0..12)
            .map(|i| search_call(&format!("call_{i}"), r#"{"query":"x"}"#.into()))
            .collect();
        let results = toolkit.call_tools(calls).await;

        assert_eq!(results.len(), 12);
        assert_eq!(catalog.requests.load(Ordering::SeqCst), 12);
        assert!(catalog.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_concurrency_clamps_to_one() {
        let catalog = Arc::new(RecordingCatalog {
            delay: Some(Duration::from_millis(5)),
            ..Default::default()
        });
        let toolkit = toolkit_with(catalog.clone(), 0);

        let calls = (0..4)
            .map(|i| search_call(&format!("call_{i}"), r#"{"query":"x"}"#.into()))
            .collect();
        toolkit.call_tools(calls).await;
        assert_eq!(catalog.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_raw_and_structured_arguments_are_equivalent() {
        let catalog = Arc::new(RecordingCatalog::default());
        let toolkit = toolkit_with(catalog.clone(), 1);

        let mut object = Map::new();
        object.insert("query".to_string(), json!("weather"));
        object.insert("limit".to_string(), json!(5));

        toolkit
            .call_tool(SEARCH_TOOLS, r#"{"query":"weather","limit":5}"#.into())
            .await
            .unwrap();
        toolkit
            .call_tool(SEARCH_TOOLS, object.into())
            .await
            .unwrap();

        let searches = catalog.searches.lock().unwrap();
        assert_eq!(searches.len(), 2);
        assert_eq!(searches[0], searches[1]);
        assert_eq!(searches[0]["query"], "weather");
        assert_eq!(searches[0]["limit"], "5");
    }

    #[tokio::test]
    async fn test_invoke_passes_arguments_through() {
        let catalog = Arc::new(RecordingCatalog::default());
        let toolkit = toolkit_with(catalog.clone(), 1);

        toolkit
            .call_tool(
                CALL_TOOL,
                r#"{"action":"svc.weather","payload":"{}","payment":1.5}"#.into(),
            )
            .await
            .unwrap();

        let invocations = catalog.invocations.lock().unwrap();
        assert_eq!(invocations[0]["action"], "svc.weather");
        assert_eq!(invocations[0]["payload"], "{}");
        assert_eq!(invocations[0]["payment"], 1.5);
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_request() {
        let catalog = Arc::new(RecordingCatalog::default());
        let toolkit = toolkit_with(catalog.clone(), 1);

        let err = toolkit
            .call_tool("does_not_exist", r#"{}"#.into())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTool(name) if name == "does_not_exist"));
        assert_eq!(catalog.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_raw_arguments() {
        let catalog = Arc::new(RecordingCatalog::default());
        let toolkit = toolkit_with(catalog.clone(), 1);

        let err = toolkit
            .call_tool(SEARCH_TOOLS, "not json at all".into())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ArgumentDecode(_)));
        assert_eq!(catalog.requests.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stringify_keeps_strings_bare() {
        assert_eq!(stringify(json!("weather")), "weather");
        assert_eq!(stringify(json!(10)), "10");
        assert_eq!(stringify(json!(true)), "true");
        assert_eq!(stringify(json!({"a": 1})), r#"{"a":1}"#);
    }
}
