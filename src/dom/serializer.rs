//! Re-emit a [`Document`] as HTML.

use ego_tree::NodeRef;
use ego_tree::iter::Edge;

use super::{Document, Node};

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text content the parser keeps as raw text (scripting
/// enabled), so it is emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Serialize the attached part of the tree back to an HTML string.
///
/// Attributes keep their stored order and are always double-quoted. Text
/// and attribute values are escaped for `&`, `<`, `>`, `"` and `'`.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for edge in doc.root().traverse() {
        match edge {
            Edge::Open(node) => open_node(node, &mut out),
            Edge::Close(node) => close_node(node, &mut out),
        }
    }
    out
}

fn open_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Document => {}
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.name);
            for (k, v) in &el.attrs {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_quoted_attribute(v));
                out.push('"');
            }
            out.push('>');
        }
        Node::Text(text) => {
            if in_raw_text_element(node) {
                out.push_str(text);
            } else {
                out.push_str(&html_escape::encode_quoted_attribute(text));
            }
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}

fn close_node(node: NodeRef<'_, Node>, out: &mut String) {
    if let Node::Element(el) = node.value() {
        if !VOID_ELEMENTS.contains(&el.name.as_str()) {
            out.push_str("</");
            out.push_str(&el.name);
            out.push('>');
        }
    }
}

fn in_raw_text_element(node: NodeRef<'_, Node>) -> bool {
    node.parent()
        .and_then(|p| p.value().as_element())
        .is_some_and(|el| RAW_TEXT_ELEMENTS.contains(&el.name.as_str()))
}
