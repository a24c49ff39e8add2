//! Tool calling definitions following the OpenAI function-calling convention.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool definition (for function calling)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<Value>, // JSON Schema
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: ToolArguments,
}

/// Tool result (response to tool call)
///
/// `content` is always a JSON document. Failures are encoded into it as
/// `{"error": <message>}` rather than dropped, so the orchestration loop
/// always sees one result per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub content: String,
}

/// Call arguments as models actually emit them: either a JSON-encoded
/// string or an already-structured object.
///
/// Untagged, so deserializing a tool call accepts both encodings directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Raw(String),
    Structured(Map<String, Value>),
}

impl From<&str> for ToolArguments {
    fn from(raw: &str) -> Self {
        ToolArguments::Raw(raw.to_string())
    }
}

impl From<String> for ToolArguments {
    fn from(raw: String) -> Self {
        ToolArguments::Raw(raw)
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(object: Map<String, Value>) -> Self {
        ToolArguments::Structured(object)
    }
}
