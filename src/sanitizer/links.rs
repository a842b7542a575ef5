//! Rewriting of site-relative anchor hrefs into absolute URLs.

use super::TreeSanitizer;
use crate::dom::Document;

/// What to do with bare `#fragment` hrefs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FragmentPolicy {
    /// Leave in-page anchors as they are.
    #[default]
    Preserve,
    /// Point in-page anchors at the article on the upstream site:
    /// `#History` becomes `{base}/wiki/{Title}#History`.
    RewriteToArticle,
}

/// Prefixes `href`s that start with the site-relative prefix (normally
/// `/wiki/`) with the site's base URL.
///
/// Hrefs that already start with the base URL are never touched, so
/// applying the rewriter twice changes nothing the second time.
///
/// # Example
///
/// ```
/// use wiki_render::{Document, LinkRewriter, TreeSanitizer, serialize};
///
/// let mut doc = Document::parse(r#"<a href="/wiki/Go">Go</a>"#).unwrap();
/// LinkRewriter::new("https://en.wikipedia.org", "/wiki/").apply(&mut doc);
/// assert_eq!(serialize(&doc), r#"<a href="https://en.wikipedia.org/wiki/Go">Go</a>"#);
/// ```
#[derive(Clone, Debug)]
pub struct LinkRewriter {
    base_prefix: String,
    relative_prefix: String,
    fragment_policy: FragmentPolicy,
    page_title: Option<String>,
}

impl LinkRewriter {
    pub fn new(base_prefix: impl Into<String>, relative_prefix: impl Into<String>) -> Self {
        Self {
            base_prefix: base_prefix.into(),
            relative_prefix: relative_prefix.into(),
            fragment_policy: FragmentPolicy::default(),
            page_title: None,
        }
    }

    pub fn fragment_policy(mut self, policy: FragmentPolicy) -> Self {
        self.fragment_policy = policy;
        self
    }

    /// Title of the article being rewritten. Only used by
    /// [`FragmentPolicy::RewriteToArticle`].
    pub fn page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// The rewritten value for `href`, or `None` if it stays as is.
    pub fn rewrite_href(&self, href: &str) -> Option<String> {
        if !self.base_prefix.is_empty() && href.starts_with(&self.base_prefix) {
            return None;
        }
        if !self.relative_prefix.is_empty() && href.starts_with(&self.relative_prefix) {
            return Some(format!("{}{}", self.base_prefix, href));
        }
        if self.fragment_policy == FragmentPolicy::RewriteToArticle && href.starts_with('#') {
            let title = self.page_title.as_deref()?;
            return Some(format!(
                "{}{}{}{}",
                self.base_prefix,
                self.relative_prefix,
                title.replace(' ', "_"),
                href
            ));
        }
        None
    }
}

impl TreeSanitizer for LinkRewriter {
    fn apply(&self, doc: &mut Document) -> usize {
        let mut rewritten = 0;
        for id in doc.elements_named("a") {
            let new_href = doc
                .get(id)
                .and_then(|n| n.value().as_element()?.attr("href").map(String::from))
                .and_then(|href| self.rewrite_href(&href));
            if let Some(href) = new_href {
                doc.update_element(id, |el| el.set_attr("href", href));
                rewritten += 1;
            }
        }
        if rewritten > 0 {
            tracing::debug!("Rewrote {rewritten} links");
        }
        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::serialize;

    const BASE: &str = "https://en.wikipedia.org";

    fn hrefs(doc: &Document) -> Vec<String> {
        doc.elements_named("a")
            .into_iter()
            .filter_map(|id| {
                doc.get(id)?
                    .value()
                    .as_element()?
                    .attr("href")
                    .map(String::from)
            })
            .collect()
    }

    #[test]
    fn rewrites_site_relative_links() {
        let mut doc = Document::parse(
            r#"<p><a href="/wiki/Go_(programming_language)">Go</a> and <a href="/wiki/Rust">Rust</a></p>"#,
        )
        .unwrap();
        assert_eq!(LinkRewriter::new(BASE, "/wiki/").apply(&mut doc), 2);
        assert_eq!(
            hrefs(&doc),
            vec![
                "https://en.wikipedia.org/wiki/Go_(programming_language)",
                "https://en.wikipedia.org/wiki/Rust",
            ]
        );
    }

    #[test]
    fn leaves_other_links_alone() {
        let source = concat!(
            r##"<a href="https://example.com/wiki/X">ext</a>"##,
            r##"<a href="#History">frag</a>"##,
            r##"<a href="mailto:someone@example.com">mail</a>"##,
            r##"<a href="/w/index.php?title=Go">idx</a>"##,
            r##"<a name="anchor">no href</a>"##,
        );
        let mut doc = Document::parse(source).unwrap();
        assert_eq!(LinkRewriter::new(BASE, "/wiki/").apply(&mut doc), 0);
        assert_eq!(
            hrefs(&doc),
            vec![
                "https://example.com/wiki/X",
                "#History",
                "mailto:someone@example.com",
                "/w/index.php?title=Go",
            ]
        );
    }

    #[test]
    fn rewriting_twice_is_idempotent() {
        let mut doc = Document::parse(r#"<a href="/wiki/X">x</a>"#).unwrap();
        let rewriter = LinkRewriter::new(BASE, "/wiki/");
        assert_eq!(rewriter.apply(&mut doc), 1);
        let once = serialize(&doc);
        assert_eq!(rewriter.apply(&mut doc), 0);
        assert_eq!(serialize(&doc), once);
        assert_eq!(hrefs(&doc), vec!["https://en.wikipedia.org/wiki/X"]);
    }

    #[test]
    fn rewrites_nested_anchors() {
        let mut doc = Document::parse(
            r#"<div><ul><li><a href="/wiki/A">A</a><ul><li><a href="/wiki/B">B</a></li></ul></li></ul></div>"#,
        )
        .unwrap();
        assert_eq!(LinkRewriter::new(BASE, "/wiki/").apply(&mut doc), 2);
        assert!(hrefs(&doc).iter().all(|h| h.starts_with(BASE)));
    }

    #[test]
    fn only_anchor_elements_are_rewritten() {
        let mut doc = Document::parse(r#"<link href="/wiki/Style"><area href="/wiki/Map">"#).unwrap();
        assert_eq!(LinkRewriter::new(BASE, "/wiki/").apply(&mut doc), 0);
    }

    #[test]
    fn fragment_policy_rewrites_to_article() {
        let rewriter = LinkRewriter::new(BASE, "/wiki/")
            .fragment_policy(FragmentPolicy::RewriteToArticle)
            .page_title("Go (programming language)");
        assert_eq!(
            rewriter.rewrite_href("#History").as_deref(),
            Some("https://en.wikipedia.org/wiki/Go_(programming_language)#History")
        );
        let once = rewriter.rewrite_href("#History").unwrap();
        assert_eq!(rewriter.rewrite_href(&once), None);
    }

    #[test]
    fn fragment_policy_without_title_leaves_fragment() {
        let rewriter =
            LinkRewriter::new(BASE, "/wiki/").fragment_policy(FragmentPolicy::RewriteToArticle);
        assert_eq!(rewriter.rewrite_href("#History"), None);
    }

    #[test]
    fn preserve_policy_leaves_fragment() {
        let rewriter = LinkRewriter::new(BASE, "/wiki/").page_title("Go");
        assert_eq!(rewriter.rewrite_href("#History"), None);
    }
}
