//! Basic usage example
//!
//! Demonstrates the two-function tool surface: hand the descriptors to a
//! model, then dispatch whatever tool calls the model returns. Here the
//! model side is simulated with hand-written calls so the example runs
//! without any LLM provider credentials.
//!
//! API key is configured via environment variable:
//! - TOOLNET_API_KEY for the catalog backend
//!
//! Usage:
//!   TOOLNET_API_KEY="your_key" cargo run --example basic_usage

use toolnet::{ApiConfig, ToolArguments, ToolCall, Toolkit};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("toolnet=debug")
        .init();

    let config = ApiConfig::from_env()
        .ok_or("TOOLNET_API_KEY is not set")?;
    let toolkit = Toolkit::builder()
        .api_key(config.api_key)
        .concurrency(4)
        .build();

    // These descriptors go into the model request alongside the messages.
    println!("Tool descriptors for the model:");
    for definition in toolkit.tools() {
        println!("  - {}", definition.function.name);
    }

    // A model would emit calls like these in its response. Dispatch them
    // as one batch; failures come back inside the result content, so the
    // conversation loop never has to special-case them.
    let calls = vec![ToolCall {
        id: "call_1".to_string(),
        name: "search_services".to_string(),
        arguments: ToolArguments::from(r#"{"query":"current weather","limit":3}"#),
    }];

    let results = toolkit.call_tools(calls).await;
    for result in &results {
        println!("[{}] {}", result.tool_call_id, result.content);
    }

    Ok(())
}
