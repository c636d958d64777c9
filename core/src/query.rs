//! Query-string construction for the content and asset endpoints.
//!
//! # Design
//! `Query` and `AssetOptions` are plain structs of `Option` fields. A field
//! contributes a parameter iff it is `Some` — `Some(0)` and `Some(false)`
//! are encoded like any other value, so a zero limit or quality is never
//! silently dropped. Values are percent-encoded; `filter` / `fields` /
//! `sort` are serialized to JSON text first and travel inside the parameter
//! value. Parameters appear in the field check order below, but callers
//! should treat the result as an unordered set of key/value pairs.
//!
//! No validation is performed beyond presence. Malformed values pass
//! through unchanged; the server is the authority on validity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Query options for `Collection::build_query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub locale: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub populate: Option<u32>,
    pub filter: Option<Value>,
    pub fields: Option<Value>,
    pub sort: Option<Value>,
}

impl Query {
    /// Encode into a query string. Empty when no field is set.
    pub fn to_query_string(&self) -> Result<String, ApiError> {
        let mut qs = QueryString::default();
        if let Some(locale) = &self.locale {
            qs.push("locale", locale);
        }
        if let Some(limit) = self.limit {
            qs.push("limit", &limit.to_string());
        }
        if let Some(skip) = self.skip {
            qs.push("skip", &skip.to_string());
        }
        if let Some(populate) = self.populate {
            qs.push("populate", &populate.to_string());
        }
        if let Some(filter) = &self.filter {
            qs.push("filter", &json_text(filter)?);
        }
        if let Some(fields) = &self.fields {
            qs.push("fields", &json_text(fields)?);
        }
        if let Some(sort) = &self.sort {
            qs.push("sort", &json_text(sort)?);
        }
        Ok(qs.finish())
    }
}

/// Transform options for asset URLs.
///
/// `Default` is all-`None`. `standard()` is what the client applies when
/// the caller supplies no options of their own. Parameter names on the
/// wire are short codes: `m`, `w`, `h`, `q`, `mime`, `re`, `t`, `o`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetOptions {
    pub resize_mode: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u32>,
    pub mime: Option<String>,
    pub redirect_to_thumbnail: Option<bool>,
    /// Epoch millis; bumping it busts any CDN cache in front of the asset.
    pub cache_invalidation_timestamp: Option<i64>,
    /// Encoded as `o=1` / `o=0` on the wire.
    pub binary: Option<bool>,
}

impl AssetOptions {
    /// Options applied when the caller does not supply any.
    pub fn standard() -> Self {
        Self {
            width: Some(800),
            binary: Some(true),
            ..Self::default()
        }
    }

    /// Encode into a query string. Empty when no field is set.
    pub fn to_query_string(&self) -> String {
        let mut qs = QueryString::default();
        if let Some(resize_mode) = &self.resize_mode {
            qs.push("m", resize_mode);
        }
        if let Some(width) = self.width {
            qs.push("w", &width.to_string());
        }
        if let Some(height) = self.height {
            qs.push("h", &height.to_string());
        }
        if let Some(quality) = self.quality {
            qs.push("q", &quality.to_string());
        }
        if let Some(mime) = &self.mime {
            qs.push("mime", mime);
        }
        if let Some(redirect) = self.redirect_to_thumbnail {
            qs.push("re", &redirect.to_string());
        }
        if let Some(timestamp) = self.cache_invalidation_timestamp {
            qs.push("t", &timestamp.to_string());
        }
        if let Some(binary) = self.binary {
            qs.push("o", if binary { "1" } else { "0" });
        }
        qs.finish()
    }
}

/// Accumulates `key=value` pairs, percent-encoding values. Keys are the
/// fixed parameter names above and never need encoding.
#[derive(Default)]
struct QueryString(String);

impl QueryString {
    fn push(&mut self, key: &str, value: &str) {
        if !self.0.is_empty() {
            self.0.push('&');
        }
        self.0.push_str(key);
        self.0.push('=');
        self.0.push_str(&urlencoding::encode(value));
    }

    fn finish(self) -> String {
        self.0
    }
}

fn json_text(value: &Value) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Decode a query string back into (key, value) pairs.
    fn decode_pairs(qs: &str) -> Vec<(String, String)> {
        qs.split('&')
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap();
                (
                    key.to_string(),
                    urlencoding::decode(value).unwrap().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn empty_query_encodes_to_empty_string() {
        assert_eq!(Query::default().to_query_string().unwrap(), "");
    }

    #[test]
    fn absent_fields_are_omitted() {
        let query = Query {
            limit: Some(10),
            ..Query::default()
        };
        assert_eq!(query.to_query_string().unwrap(), "limit=10");
    }

    #[test]
    fn zero_values_are_encoded_not_dropped() {
        let query = Query {
            limit: Some(0),
            skip: Some(0),
            populate: Some(0),
            ..Query::default()
        };
        assert_eq!(
            query.to_query_string().unwrap(),
            "limit=0&skip=0&populate=0"
        );
    }

    #[test]
    fn full_query_follows_check_order() {
        let query = Query {
            locale: Some("de-DE".to_string()),
            limit: Some(100),
            skip: Some(100),
            populate: Some(2),
            filter: Some(json!({})),
            fields: Some(json!({})),
            sort: Some(json!({})),
        };
        assert_eq!(
            query.to_query_string().unwrap(),
            "locale=de-DE&limit=100&skip=100&populate=2&filter=%7B%7D&fields=%7B%7D&sort=%7B%7D"
        );
    }

    #[test]
    fn structured_fields_roundtrip_through_json() {
        let filter = json!({"status": {"$eq": "published"}, "tags": ["a", "b"]});
        let sort = json!({"createdAt": -1});
        let query = Query {
            filter: Some(filter.clone()),
            sort: Some(sort.clone()),
            ..Query::default()
        };

        let pairs = decode_pairs(&query.to_query_string().unwrap());
        assert_eq!(pairs.len(), 2);

        let decoded_filter: Value = serde_json::from_str(&pairs[0].1).unwrap();
        assert_eq!(pairs[0].0, "filter");
        assert_eq!(decoded_filter, filter);

        let decoded_sort: Value = serde_json::from_str(&pairs[1].1).unwrap();
        assert_eq!(pairs[1].0, "sort");
        assert_eq!(decoded_sort, sort);
    }

    #[test]
    fn locale_is_percent_encoded() {
        let query = Query {
            locale: Some("de DE".to_string()),
            ..Query::default()
        };
        assert_eq!(query.to_query_string().unwrap(), "locale=de%20DE");
    }

    #[test]
    fn empty_asset_options_encode_to_empty_string() {
        assert_eq!(AssetOptions::default().to_query_string(), "");
    }

    #[test]
    fn standard_asset_options() {
        assert_eq!(AssetOptions::standard().to_query_string(), "w=800&o=1");
    }

    #[test]
    fn asset_options_use_short_parameter_names() {
        let options = AssetOptions {
            resize_mode: Some("thumbnail".to_string()),
            width: Some(400),
            height: Some(400),
            quality: Some(80),
            mime: Some("webp".to_string()),
            redirect_to_thumbnail: Some(true),
            cache_invalidation_timestamp: Some(1_700_000_000_000),
            binary: Some(true),
        };
        assert_eq!(
            options.to_query_string(),
            "m=thumbnail&w=400&h=400&q=80&mime=webp&re=true&t=1700000000000&o=1"
        );
    }

    #[test]
    fn binary_false_encodes_as_zero() {
        let options = AssetOptions {
            binary: Some(false),
            ..AssetOptions::default()
        };
        assert_eq!(options.to_query_string(), "o=0");
    }

    #[test]
    fn zero_quality_is_encoded_not_dropped() {
        let options = AssetOptions {
            quality: Some(0),
            ..AssetOptions::default()
        };
        assert_eq!(options.to_query_string(), "q=0");
    }

    #[test]
    fn asset_options_deserialize_from_camel_case() {
        let options: AssetOptions = serde_json::from_str(
            r#"{"resizeMode":"thumbnail","redirectToThumbnail":false,"cacheInvalidationTimestamp":42}"#,
        )
        .unwrap();
        assert_eq!(options.resize_mode.as_deref(), Some("thumbnail"));
        assert_eq!(options.redirect_to_thumbnail, Some(false));
        assert_eq!(options.cache_invalidation_timestamp, Some(42));
        assert!(options.width.is_none());
    }
}
