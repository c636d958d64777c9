//! Client core for a headless-CMS HTTP API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! round-trip with any HTTP client capable of a GET with custom headers,
//! making the core fully deterministic and testable.
//!
//! # Design
//! - `CmsClient` is stateless — it holds only a `host` and an optional API
//!   key, and hands out `Collection` / `Image` accessors bound to them.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Query-string construction is the one piece of real logic: `Option`
//!   presence decides whether a parameter appears, and `filter` / `fields` /
//!   `sort` travel as JSON text inside the parameter value.
//! - Response payloads are passed through as parsed JSON; the server owns
//!   the document schema.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::{CmsClient, Collection, Image};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, API_KEY_HEADER};
pub use query::{AssetOptions, Query};
pub use types::{Asset, DocumentMeta};
