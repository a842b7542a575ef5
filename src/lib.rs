//! # wiki_render
//!
//! Turns encyclopedia articles fetched from the Wikipedia API into clean,
//! navigable documents for browsers and JSON clients.
//!
//! ## Overview
//!
//! A [`Pipeline`] takes a [`FetchedArticle`] and a [`RenderMode`] and
//! produces a [`RenderedArticle`]:
//!
//! - HTML from `action=parse` is parsed into a [`Document`], pruned of
//!   infoboxes and edit-section links by [`PruneRule`]s, has its `/wiki/`
//!   links made absolute by a [`LinkRewriter`], and is serialized again.
//! - Plain-text extracts are split into headings and paragraphs by
//!   [`segment`].
//! - Summaries reduce the first paragraph to plain text with the regex
//!   tag stripper ([`strip`], [`first_paragraph`]).
//!
//! Rendering is pure CPU work on per-request data; a single pipeline can be
//! shared by any number of request handlers.
//!
//! ## Quick start
//!
//! ```
//! use wiki_render::{FetchedArticle, Pipeline, RenderMode};
//!
//! let pipeline = Pipeline::builder().build().unwrap();
//! let article = FetchedArticle::extract("Go", "Go is a language.\n== History ==\nIt began in 2007.");
//!
//! let rendered = pipeline.render(&article, RenderMode::FullDocument).unwrap();
//! assert_eq!(rendered.blocks.unwrap().len(), 3);
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `client` | **yes** | Enables [`WikiClient`] and [`ClientConfig`] on top of `reqwest`. |

pub mod article;
pub mod config;
pub mod dom;
pub mod error;
pub mod pipeline;
pub mod sanitizer;
pub mod text;
pub mod upstream;

pub use article::{BodyKind, FetchedArticle, RenderMode, RenderedArticle};
#[cfg(feature = "client")]
pub use config::ClientConfig;
pub use config::PipelineBuilder;
pub use dom::{Document, Element, Node, serialize};
pub use error::{Result, WikiRenderError};
pub use pipeline::Pipeline;
pub use sanitizer::{FragmentPolicy, LinkRewriter, PruneRule, SanitizerPipeline, TreeSanitizer};
pub use text::{BlockKind, ContentBlock, first_paragraph, segment, strip};
#[cfg(feature = "client")]
pub use upstream::WikiClient;
pub use upstream::{ApiResponse, decode_article, query_params};
