//! Article values passed into and out of the [`Pipeline`](crate::Pipeline).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::WikiRenderError;
use crate::text::ContentBlock;

/// Which upstream representation an article body is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Rendered HTML from `action=parse`.
    HtmlFragment,
    /// Plain text from `prop=extracts&explaintext=1`.
    PlainExtract,
}

impl FromStr for BodyKind {
    type Err = WikiRenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(BodyKind::HtmlFragment),
            "extract" => Ok(BodyKind::PlainExtract),
            other => Err(WikiRenderError::UnsupportedBodyKind(other.to_string())),
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::HtmlFragment => f.write_str("html"),
            BodyKind::PlainExtract => f.write_str("extract"),
        }
    }
}

/// An article as returned by the upstream API, before any cleanup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedArticle {
    pub title: String,
    pub raw_body: String,
    pub body_kind: BodyKind,
}

impl FetchedArticle {
    pub fn new(title: impl Into<String>, raw_body: impl Into<String>, body_kind: BodyKind) -> Self {
        Self {
            title: title.into(),
            raw_body: raw_body.into(),
            body_kind,
        }
    }

    pub fn html(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self::new(title, html, BodyKind::HtmlFragment)
    }

    pub fn extract(title: impl Into<String>, extract: impl Into<String>) -> Self {
        Self::new(title, extract, BodyKind::PlainExtract)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    FullDocument,
    FirstParagraphOnly,
}

/// Output of [`Pipeline::render`](crate::Pipeline::render). Exactly one of
/// `html`, `blocks` and `summary` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedArticle {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<ContentBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RenderedArticle {
    pub fn html(title: impl Into<String>, html: String) -> Self {
        Self {
            title: title.into(),
            html: Some(html),
            blocks: None,
            summary: None,
        }
    }

    pub fn blocks(title: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            title: title.into(),
            html: None,
            blocks: Some(blocks),
            summary: None,
        }
    }

    pub fn summary(title: impl Into<String>, summary: String) -> Self {
        Self {
            title: title.into(),
            html: None,
            blocks: None,
            summary: Some(summary),
        }
    }
}
