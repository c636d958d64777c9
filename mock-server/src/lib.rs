use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

/// One document as stored (and served) by the mock CMS.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub locale: String,
    pub data: Value,
}

/// Fresh document with a generated id.
pub fn document(locale: &str, data: Value) -> StoredDocument {
    StoredDocument {
        id: Uuid::new_v4().to_string(),
        locale: locale.to_string(),
        data,
    }
}

/// Seeded state for the mock CMS. The API surface is read-only, so the
/// state is frozen once handed to `app`.
#[derive(Debug, Default)]
pub struct MockCms {
    collections: HashMap<String, Vec<StoredDocument>>,
    required_api_key: Option<String>,
}

impl MockCms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require this `api-key` header on every request; 401 otherwise.
    pub fn require_api_key(mut self, key: &str) -> Self {
        self.required_api_key = Some(key.to_string());
        self
    }

    pub fn with_collection(mut self, name: &str, documents: Vec<StoredDocument>) -> Self {
        self.collections.insert(name.to_string(), documents);
        self
    }
}

#[derive(Clone)]
struct AppState {
    cms: Arc<MockCms>,
}

pub fn app(cms: MockCms) -> Router {
    let state = AppState { cms: Arc::new(cms) };
    Router::new()
        .route("/content/items/{collection}", get(query_collection))
        .route("/content/item/{collection}/{id}", get(get_document))
        .route("/assets/image/{asset_id}", get(get_image))
        .with_state(state)
}

pub async fn run(listener: TcpListener, cms: MockCms) -> Result<(), std::io::Error> {
    axum::serve(listener, app(cms)).await
}

fn check_api_key(cms: &MockCms, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(required) = &cms.required_api_key else {
        return Ok(());
    };
    match headers.get("api-key").and_then(|v| v.to_str().ok()) {
        Some(key) if key == required => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Paging parameters honored by the mock. The real CMS accepts more
/// (`locale`, `populate`, `filter`, `fields`, `sort`); the mock accepts
/// and ignores them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListParams {
    limit: Option<usize>,
    skip: Option<usize>,
}

async fn query_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Json<Vec<StoredDocument>>, StatusCode> {
    check_api_key(&state.cms, &headers)?;
    let documents = state
        .cms
        .collections
        .get(&collection)
        .ok_or(StatusCode::NOT_FOUND)?;

    let page = documents.iter().skip(params.skip.unwrap_or(0));
    let page: Vec<StoredDocument> = match params.limit {
        Some(limit) => page.take(limit).cloned().collect(),
        None => page.cloned().collect(),
    };
    Ok(Json(page))
}

async fn get_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<StoredDocument>, StatusCode> {
    check_api_key(&state.cms, &headers)?;
    state
        .cms
        .collections
        .get(&collection)
        .and_then(|documents| documents.iter().find(|doc| doc.id == id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Echoes the received transform parameters back so clients can verify
/// their URL encoding end-to-end.
async fn get_image(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Query(transform): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    check_api_key(&state.cms, &headers)?;
    Ok(Json(json!({
        "asset_id": asset_id,
        "transform": transform,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_document_serializes_to_json() {
        let doc = StoredDocument {
            id: "doc-1".to_string(),
            locale: "en-US".to_string(),
            data: json!({"title": "Test"}),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["id"], "doc-1");
        assert_eq!(json["locale"], "en-US");
        assert_eq!(json["data"]["title"], "Test");
    }

    #[test]
    fn document_helper_generates_unique_ids() {
        let a = document("en-US", json!({}));
        let b = document("en-US", json!({}));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn list_params_ignore_unknown_parameters() {
        let params: ListParams =
            serde_json::from_str(r#"{"limit": 2, "locale": "de-DE"}"#).unwrap();
        assert_eq!(params.limit, Some(2));
        assert!(params.skip.is_none());
    }

    #[test]
    fn mock_cms_collections_are_seedable() {
        let cms = MockCms::new()
            .with_collection("posts", vec![document("en-US", json!({"n": 1}))])
            .require_api_key("k");
        assert_eq!(cms.collections["posts"].len(), 1);
        assert_eq!(cms.required_api_key.as_deref(), Some("k"));
    }
}
