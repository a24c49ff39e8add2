//! The two fixed tool descriptors exposed to the model orchestration loop.

use crate::types::tool::{FunctionDefinition, ToolDefinition};
use serde_json::json;

/// Name of the catalog search tool.
pub const SEARCH_TOOLS: &str = "search_services";

/// Name of the service invocation tool.
pub const CALL_TOOL: &str = "invoke_service";

/// Build the descriptor list. Called once per [`crate::Toolkit`]; the
/// descriptors are constant for the life of the process.
pub(crate) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: SEARCH_TOOLS.to_string(),
                description: Some(format!(
                    "Search for tools. The tools cover a wide range of domains \
                     including data sources, APIs, SDKs, etc. Actions returned \
                     should be used in {CALL_TOOL}."
                )),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The query to search for tools. Describe what you want to do or what tools to use."
                        },
                        "limit": {
                            "type": "number",
                            "description": "The maximum number of tools to return (must be between 1 and 100, default is 10)."
                        }
                    },
                    "required": ["query"]
                })),
            },
        },
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: CALL_TOOL.to_string(),
                description: Some(format!("Call a tool returned by {SEARCH_TOOLS}.")),
                parameters: Some(json!({
                    "type": "object",
                    "properties": {
                        "action": {
                            "type": "string",
                            "description": format!("The exact action to be called from the {SEARCH_TOOLS} result.")
                        },
                        "payload": {
                            "type": "string",
                            "description": "The action payload (can be a JSON object or JSON-encoded string)."
                        },
                        "payment": {
                            "type": "number",
                            "description": "Amount to authorize in USD. A positive number indicates a charge cap, while a negative number requests a minimum payout."
                        }
                    },
                    "required": ["action", "payload"]
                })),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_two_descriptors() {
        let definitions = definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].function.name, SEARCH_TOOLS);
        assert_eq!(definitions[1].function.name, CALL_TOOL);
        assert!(definitions.iter().all(|d| d.tool_type == "function"));
    }

    #[test]
    fn test_search_schema_requires_query() {
        let definitions = definitions();
        let schema = definitions[0].function.parameters.as_ref().unwrap();
        assert_eq!(schema["required"], serde_json::json!(["query"]));
        assert!(schema["properties"]["limit"].is_object());
    }

    #[test]
    fn test_invoke_schema_requires_action_and_payload() {
        let definitions = definitions();
        let schema = definitions[1].function.parameters.as_ref().unwrap();
        assert_eq!(schema["required"], serde_json::json!(["action", "payload"]));
        assert!(schema["properties"]["payment"].is_object());
    }
}
