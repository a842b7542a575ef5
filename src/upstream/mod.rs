//! The Wikipedia API as seen from this crate: response decoding and, with
//! the `client` feature, a small HTTP client.
//!
//! Two response shapes are understood:
//!
//! - `action=parse`: `{"parse": {"title": ..., "text": {"*": "<html>"}}}`
//! - `action=query&prop=extracts`:
//!   `{"query": {"pages": {"<id>": {"title": ..., "extract": "..."}}}}`

#[cfg(feature = "client")]
mod client;

#[cfg(feature = "client")]
pub use client::WikiClient;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::article::{BodyKind, FetchedArticle};
use crate::error::{Result, WikiRenderError};

/// Query parameters for fetching `title` in the given representation.
pub fn query_params(title: &str, kind: BodyKind) -> Vec<(&'static str, String)> {
    let mut params = vec![("format", "json".to_string()), ("redirects", "1".to_string())];
    match kind {
        BodyKind::HtmlFragment => {
            params.push(("action", "parse".to_string()));
            params.push(("page", title.to_string()));
            params.push(("prop", "text".to_string()));
        }
        BodyKind::PlainExtract => {
            params.push(("action", "query".to_string()));
            params.push(("prop", "extracts".to_string()));
            params.push(("explaintext", "1".to_string()));
            params.push(("titles", title.to_string()));
        }
    }
    params
}

/// Top-level API response. Exactly one of the fields is normally present.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    parse: Option<ParseBody>,
    query: Option<QueryBody>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    #[serde(default)]
    title: String,
    text: Option<ParseText>,
}

#[derive(Debug, Deserialize)]
struct ParseText {
    #[serde(rename = "*", default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: BTreeMap<String, QueryPage>,
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    title: String,
    extract: Option<String>,
    missing: Option<serde_json::Value>,
    invalid: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

impl ApiResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Turn the response into a [`FetchedArticle`].
    ///
    /// `requested_title` is only used for error messages. A body that is
    /// present but empty is passed through; the pipeline reports it as
    /// [`WikiRenderError::EmptyArticle`].
    pub fn into_article(self, requested_title: &str) -> Result<FetchedArticle> {
        if let Some(error) = self.error {
            if error.code == "missingtitle" {
                return Err(WikiRenderError::NotFound(requested_title.to_string()));
            }
            return Err(WikiRenderError::Upstream {
                code: error.code,
                info: error.info,
            });
        }

        if let Some(parse) = self.parse {
            if parse.title.is_empty() {
                return Err(WikiRenderError::NotFound(requested_title.to_string()));
            }
            let html = parse.text.map(|t| t.content).unwrap_or_default();
            return Ok(FetchedArticle::html(parse.title, html));
        }

        if let Some(query) = self.query {
            let Some(page) = query.pages.into_values().next() else {
                return Err(WikiRenderError::NotFound(requested_title.to_string()));
            };
            if page.missing.is_some() || page.invalid.is_some() || page.title.is_empty() {
                return Err(WikiRenderError::NotFound(requested_title.to_string()));
            }
            return Ok(FetchedArticle::extract(
                page.title,
                page.extract.unwrap_or_default(),
            ));
        }

        Err(WikiRenderError::UnsupportedBodyKind(
            "response has neither `parse` nor `query`".into(),
        ))
    }
}

/// Decode a raw API response body straight into a [`FetchedArticle`].
pub fn decode_article(body: &str, requested_title: &str) -> Result<FetchedArticle> {
    ApiResponse::from_json(body)?.into_article(requested_title)
}
