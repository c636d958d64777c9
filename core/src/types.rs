//! Response payload types.
//!
//! # Design
//! The CMS defines the document format server-side; this client passes the
//! parsed JSON through without structural validation. Callers that know a
//! collection's shape can substitute their own `T`; everyone else gets
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope around a document payload as returned by the API.
///
/// Transparent over the payload: the wire format is whatever JSON the
/// server produced for the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentMeta<T = Value> {
    pub payload: T,
}

/// An image asset descriptor as returned by the asset endpoint.
pub type Asset = Value;
