//! Stateless HTTP request builder and response parser for the CMS API.
//!
//! # Design
//! `CmsClient` holds only a `host` and an optional API key and carries no
//! mutable state between calls. It hands out `Collection` and `Image`
//! accessors bound to those values. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, API_KEY_HEADER};
use crate::query::{AssetOptions, Query};
use crate::types::{Asset, DocumentMeta};

/// Entry point binding a CMS host and optional API key.
///
/// Pure binding constructor: performs no I/O, only closes over `host` and
/// `api_key`. Multiple clients with different hosts or keys coexist
/// independently.
#[derive(Debug, Clone)]
pub struct CmsClient {
    host: String,
    api_key: Option<String>,
}

impl CmsClient {
    pub fn new(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(host: &str, api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::new(host)
        }
    }

    /// Accessor for a named collection of documents.
    pub fn collection(&self, name: &str) -> Collection {
        Collection {
            bulk_endpoint: format!("{}/content/items/{name}", self.host),
            singleton_endpoint: format!("{}/content/item/{name}", self.host),
            api_key: self.api_key.clone(),
        }
    }

    /// Accessor for an image asset with the standard transform options
    /// (`width: 800`, `binary: true`).
    pub fn image(&self, asset_id: &str) -> Image {
        self.image_with_options(asset_id, AssetOptions::standard())
    }

    /// Accessor for an image asset with explicit transform options.
    ///
    /// The transform URL is computed here, once; `Image::path` is a plain
    /// string accessor with no further work behind it.
    pub fn image_with_options(&self, asset_id: &str, options: AssetOptions) -> Image {
        let query = options.to_query_string();
        let path = if query.is_empty() {
            format!("{}/assets/image/{asset_id}", self.host)
        } else {
            format!("{}/assets/image/{asset_id}?{query}", self.host)
        };
        Image {
            path,
            api_key: self.api_key.clone(),
        }
    }
}

/// Accessor for one collection, bound to a host and optional API key.
#[derive(Debug, Clone)]
pub struct Collection {
    bulk_endpoint: String,
    singleton_endpoint: String,
    api_key: Option<String>,
}

impl Collection {
    /// Request for a page of documents. `None` queries with no parameters;
    /// the server decides default paging.
    pub fn build_query(&self, query: Option<&Query>) -> Result<HttpRequest, ApiError> {
        let qs = match query {
            Some(query) => query.to_query_string()?,
            None => String::new(),
        };
        let url = if qs.is_empty() {
            self.bulk_endpoint.clone()
        } else {
            format!("{}?{qs}", self.bulk_endpoint)
        };
        Ok(HttpRequest {
            url,
            headers: api_key_headers(&self.api_key),
        })
    }

    pub fn parse_query<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<DocumentMeta<T>>, ApiError> {
        check_status(&response)?;
        decode_body(&response.body)
    }

    /// Request for a single document by id. No query parameters.
    pub fn build_document(&self, id: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}/{id}", self.singleton_endpoint),
            headers: api_key_headers(&self.api_key),
        }
    }

    pub fn parse_document<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<DocumentMeta<T>, ApiError> {
        check_status(&response)?;
        decode_body(&response.body)
    }
}

/// Accessor for one image asset.
///
/// The transform URL is computed eagerly when the accessor is created, so
/// `path` can be embedded directly in markup without any request machinery.
#[derive(Debug, Clone)]
pub struct Image {
    path: String,
    api_key: Option<String>,
}

impl Image {
    /// The full asset URL, including encoded transform options. No I/O.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request fetching the asset at `path`. The API key, when configured,
    /// rides along here just as on content requests.
    pub fn build_fetch(&self) -> HttpRequest {
        HttpRequest {
            url: self.path.clone(),
            headers: api_key_headers(&self.api_key),
        }
    }

    pub fn parse_fetch(&self, response: HttpResponse) -> Result<Asset, ApiError> {
        check_status(&response)?;
        decode_body(&response.body)
    }
}

fn api_key_headers(api_key: &Option<String>) -> Vec<(String, String)> {
    match api_key {
        Some(key) => vec![(API_KEY_HEADER.to_string(), key.clone())],
        None => Vec::new(),
    }
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
