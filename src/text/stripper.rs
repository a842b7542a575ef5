//! Regex-based reduction of HTML to plain preview text.
//!
//! This is deliberately crude: tags are anything between `<` and the next
//! `>`, so a literal `>` inside an attribute value cuts the tag short. Use
//! [`segment`](super::segment) or the tree sanitizers when structure matters.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").unwrap());

/// Remove every tag, then trim and collapse whitespace runs to one space.
///
/// ```
/// assert_eq!(
///     wiki_render::strip("<p>Hello <b>world</b></p>\n\n  extra"),
///     "Hello world extra",
/// );
/// ```
pub fn strip(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, "");
    WHITESPACE_RE
        .replace_all(without_tags.trim(), " ")
        .into_owned()
}

/// The stripped text of the first `<p>` element with any text in it.
///
/// Falls back to stripping the whole input when it has no `<p>` elements at
/// all. Returns `None` if nothing but whitespace is left.
pub fn first_paragraph(html: &str) -> Option<String> {
    let mut saw_paragraph = false;
    for caps in PARAGRAPH_RE.captures_iter(html) {
        saw_paragraph = true;
        let text = strip(&caps[1]);
        if !text.is_empty() {
            return Some(text);
        }
    }
    if saw_paragraph {
        return None;
    }
    Some(strip(html)).filter(|text| !text.is_empty())
}
