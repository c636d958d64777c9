//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps the core deterministic and easy to
//! test, and leaves connection reuse, timeouts and cancellation entirely to
//! the transport the caller picks.
//!
//! All fields use owned types (`String`, `Vec`) so values can move freely
//! between threads and into whatever executor the caller runs.

/// Header name carrying the configured API key.
pub const API_KEY_HEADER: &str = "api-key";

/// An HTTP request described as plain data.
///
/// Built by the `build_*` methods on `Collection` and `Image`. Every CMS
/// endpoint this client targets is a GET, so no method field is carried.
/// The caller is responsible for executing this request against the network
/// and returning the corresponding `HttpResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to the matching `parse_*` method for status checking and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
