//! # toolnet
//!
//! Rust SDK for the Toolnet services network. It gives generative-model
//! agents a uniform two-function tool-calling contract over the network's
//! catalog of third-party services: one function searches the catalog, the
//! other invokes a selected entry.
//!
//! ## Overview
//!
//! The SDK exposes exactly two tool descriptors to the model orchestration
//! loop (`search_services` and `invoke_service`). When the model issues tool
//! calls, [`Toolkit::call_tools`] fans them out as authenticated HTTP calls
//! against the Toolnet backend with bounded concurrency, and reduces every
//! outcome into a [`ToolResult`] correlated back to the originating call by
//! its identifier. A failing service call never fails the batch: the failure
//! is encoded into that call's result content as `{"error": ...}`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toolnet::{Toolkit, ToolCall};
//!
//! #[tokio::main]
//! async fn main() -> toolnet::Result<()> {
//!     let toolkit = Toolkit::builder()
//!         .api_key("your-agent-api-key")
//!         .build();
//!
//!     // Hand the descriptors to your model orchestration loop.
//!     let _definitions = toolkit.tools();
//!
//!     // Dispatch the tool calls the model produced.
//!     let results = toolkit
//!         .call_tools(vec![ToolCall {
//!             id: "call_1".into(),
//!             name: "search_services".into(),
//!             arguments: r#"{"query":"weather"}"#.into(),
//!         }])
//!         .await;
//!
//!     for result in results {
//!         println!("{}: {}", result.tool_call_id, result.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`toolkit`] | Tool descriptors and the bounded-concurrency dispatcher |
//! | [`catalog`] | The catalog API surface (`/actions/search`, `/actions/call`) |
//! | [`transport`] | Authenticated HTTP execution against a configured endpoint |
//! | [`config`] | Endpoint defaults and API configuration |
//! | [`types`] | Tool call, result, descriptor and argument types |
//! | [`error`] | Unified error taxonomy |

pub mod catalog;
pub mod config;
pub mod toolkit;
pub mod transport;
pub mod types;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogApi};
pub use config::ApiConfig;
pub use toolkit::{Toolkit, ToolkitBuilder, CALL_TOOL, SEARCH_TOOLS};
pub use transport::{HttpTransport, RequestOptions};
pub use types::tool::{
    FunctionDefinition, ToolArguments, ToolCall, ToolDefinition, ToolResult,
};
