//! Authenticated HTTP execution against a configured endpoint.

pub mod http;

pub use http::{HttpTransport, RequestOptions, TransportError, DEFAULT_TIMEOUT};
