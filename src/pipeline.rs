//! The render facade: picks a strategy per body kind and mode.

use std::fmt;

use crate::article::{BodyKind, FetchedArticle, RenderMode, RenderedArticle};
use crate::config::PipelineBuilder;
use crate::dom::{Document, serialize};
use crate::error::{Result, WikiRenderError};
use crate::sanitizer::{FragmentPolicy, LinkRewriter, SanitizerPipeline, TreeSanitizer};
use crate::text::{first_paragraph, segment};

/// Turns a [`FetchedArticle`] into a [`RenderedArticle`].
///
/// Holds only immutable settings, so one pipeline can serve any number of
/// concurrent requests. Rendering performs no I/O.
///
/// # Example
///
/// ```
/// use wiki_render::{FetchedArticle, Pipeline, RenderMode};
///
/// let pipeline = Pipeline::default();
/// let article = FetchedArticle::html(
///     "Go",
///     r#"<p><a href="/wiki/Google">Google</a> made it.</p>"#,
/// );
/// let rendered = pipeline.render(&article, RenderMode::FullDocument).unwrap();
/// assert_eq!(
///     rendered.html.as_deref(),
///     Some(r#"<p><a href="https://en.wikipedia.org/wiki/Google">Google</a> made it.</p>"#),
/// );
/// ```
pub struct Pipeline {
    base_url: String,
    relative_prefix: String,
    fragment_policy: FragmentPolicy,
    pruners: SanitizerPipeline,
}

impl Pipeline {
    pub(crate) fn new(
        base_url: String,
        relative_prefix: String,
        fragment_policy: FragmentPolicy,
        pruners: SanitizerPipeline,
    ) -> Self {
        Self {
            base_url,
            relative_prefix,
            fragment_policy,
            pruners,
        }
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn relative_prefix(&self) -> &str {
        &self.relative_prefix
    }

    pub fn prune_rule_count(&self) -> usize {
        self.pruners.len()
    }

    /// Render `article` in the requested mode.
    ///
    /// Fails with [`WikiRenderError::EmptyArticle`] whenever nothing usable
    /// is left, including an empty or whitespace-only body.
    pub fn render(&self, article: &FetchedArticle, mode: RenderMode) -> Result<RenderedArticle> {
        if article.raw_body.trim().is_empty() {
            tracing::debug!("Article {:?} has an empty body", article.title);
            return Err(WikiRenderError::EmptyArticle);
        }

        tracing::debug!(
            "Rendering {:?} as {} in {:?} mode",
            article.title,
            article.body_kind,
            mode
        );

        match (mode, article.body_kind) {
            (RenderMode::FullDocument, BodyKind::HtmlFragment) => {
                let html = self.sanitize_html(&article.title, &article.raw_body)?;
                Ok(RenderedArticle::html(&article.title, html))
            }
            (RenderMode::FullDocument, BodyKind::PlainExtract) => {
                let blocks = segment(&article.raw_body);
                if blocks.is_empty() {
                    return Err(WikiRenderError::EmptyArticle);
                }
                Ok(RenderedArticle::blocks(&article.title, blocks))
            }
            (RenderMode::FirstParagraphOnly, kind) => {
                let summary = match kind {
                    BodyKind::HtmlFragment => {
                        first_paragraph(&self.sanitize_html(&article.title, &article.raw_body)?)
                    }
                    BodyKind::PlainExtract => first_line(&article.raw_body),
                }
                .ok_or(WikiRenderError::EmptyArticle)?;
                Ok(RenderedArticle::summary(&article.title, summary))
            }
        }
    }

    /// Parse `fragment`, run the prune rules and the link rewriter, and
    /// serialize the result.
    ///
    /// Fails with [`WikiRenderError::EmptyArticle`] if nothing visible is
    /// left once the prune rules have run, even when empty wrapper
    /// elements remain.
    pub fn sanitize_html(&self, title: &str, fragment: &str) -> Result<String> {
        let mut doc = Document::parse(fragment)?;
        self.pruners.apply(&mut doc);
        if doc.is_blank() {
            tracing::debug!("Nothing left of {title:?} after pruning");
            return Err(WikiRenderError::EmptyArticle);
        }
        self.link_rewriter(title).apply(&mut doc);
        Ok(serialize(&doc))
    }

    fn link_rewriter(&self, title: &str) -> LinkRewriter {
        LinkRewriter::new(&self.base_url, &self.relative_prefix)
            .fragment_policy(self.fragment_policy)
            .page_title(title)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("base_url", &self.base_url)
            .field("relative_prefix", &self.relative_prefix)
            .field("fragment_policy", &self.fragment_policy)
            .field("prune_rules", &self.pruners.len())
            .finish()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        PipelineBuilder::new().into_pipeline()
    }
}

fn first_line(extract: &str) -> Option<String> {
    extract
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
