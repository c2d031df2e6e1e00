//! Host APIs for provider adapters.
//!
//! - [`http`] - HTTP client with tracing and JSON helpers

pub mod http;

// Re-export key types
pub use http::HttpClient;
