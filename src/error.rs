use thiserror::Error;

/// Unified error type for the SDK.
///
/// Single-call paths (`call_tool`, the catalog operations, the raw HTTP
/// execute) surface these directly. The batch path (`call_tools`) contains
/// them per item and encodes the message into the corresponding tool result
/// instead, so one failing service call never poisons a whole batch.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built or the transport call could not
    /// complete.
    #[error("transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status}, body: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A tool call's string-encoded arguments were not a valid JSON object.
    #[error("failed to decode tool arguments: {0}")]
    ArgumentDecode(#[source] serde_json::Error),

    /// The tool name is not one of the two this SDK exposes.
    #[error("unknown tool name: {0}")]
    UnknownTool(String),
}
