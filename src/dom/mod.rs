//! Arena-backed HTML tree that the sanitizers operate on.
//!
//! Markup is parsed permissively with `scraper` (html5ever) and copied into an
//! [`ego_tree::Tree`] of [`Node`] values. Nodes are addressed by
//! [`NodeId`] handles into the arena, so parent links never own their
//! children and a detached subtree simply becomes unreachable from the root.

mod serializer;

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::Html;
use scraper::node::Node as ParsedNode;

use crate::error::{Result, WikiRenderError};

pub use serializer::serialize;

/// Elements that render content without any text of their own.
const EMBEDDED_ELEMENTS: &[&str] = &[
    "audio", "canvas", "embed", "iframe", "img", "math", "object", "picture", "svg", "video",
];

/// Elements whose text is never displayed.
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

/// A single node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// The root of every [`Document`]. Appears exactly once.
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// An element's tag name and its attributes, kept in parser order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if the name already
    /// exists so attribute order is preserved.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key, value)),
        }
    }
}

/// A parsed HTML fragment rooted at a single [`Node::Document`].
#[derive(Clone, Debug)]
pub struct Document {
    tree: Tree<Node>,
}

impl Document {
    /// Create a document holding only the root node.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(Node::Document),
        }
    }

    /// Parse an HTML fragment.
    ///
    /// Parsing follows browser rules: unclosed tags are closed, unknown tags
    /// become ordinary elements, and doctypes and processing instructions are
    /// dropped. Returns [`WikiRenderError::ParseFailure`] only if the parser
    /// hands back no fragment container at all.
    pub fn parse(fragment: &str) -> Result<Self> {
        let html = Html::parse_fragment(fragment);
        if !html.errors.is_empty() {
            tracing::debug!("Tolerated {} HTML parse errors", html.errors.len());
        }

        let Some(container) = html.tree.root().children().find(|c| c.value().is_element())
        else {
            return Err(WikiRenderError::ParseFailure(
                "parser produced no fragment container".into(),
            ));
        };

        let mut doc = Self::new();
        let root = doc.root_id();
        import_children(&mut doc.tree, root, container);
        Ok(doc)
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn root(&self) -> NodeRef<'_, Node> {
        self.tree.root()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.tree.get(id)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.first_child().map(|c| c.id())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.next_sibling().map(|s| s.id())
    }

    /// Append a new child under `parent`, returning its id.
    pub fn append(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        let mut parent = self.tree.get_mut(parent)?;
        Some(parent.append(node).id())
    }

    /// Detach `id` together with its whole subtree. The root cannot be
    /// detached; returns `false` for the root or an unknown id.
    pub fn detach(&mut self, id: NodeId) -> bool {
        if id == self.root_id() {
            return false;
        }
        match self.tree.get_mut(id) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        }
    }

    /// Run `f` against the element stored at `id`, if it is an element.
    pub fn update_element<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut node = self.tree.get_mut(id)?;
        node.value().as_element_mut().map(f)
    }

    /// Ids of all attached elements named `name`, in document (pre-)order.
    pub fn elements_named(&self, name: &str) -> Vec<NodeId> {
        self.tree
            .root()
            .descendants()
            .filter(|n| n.value().as_element().is_some_and(|el| el.name == name))
            .map(|n| n.id())
            .collect()
    }

    /// `true` if nothing attached would render: no visible text and no
    /// embedded content such as images.
    pub fn is_blank(&self) -> bool {
        !self.tree.root().descendants().any(|n| match n.value() {
            Node::Text(text) => {
                !text.trim().is_empty()
                    && !n
                        .parent()
                        .and_then(|p| p.value().as_element())
                        .is_some_and(|el| HIDDEN_TEXT_ELEMENTS.contains(&el.name.as_str()))
            }
            Node::Element(el) => EMBEDDED_ELEMENTS.contains(&el.name.as_str()),
            _ => false,
        })
    }

    /// Concatenated text of every attached text node.
    pub fn text_content(&self) -> String {
        self.tree
            .root()
            .descendants()
            .filter_map(|n| match n.value() {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy the children of `source` under `target`, depth-first with an
/// explicit work stack so nesting depth is bounded by the heap, not the
/// call stack.
fn import_children(tree: &mut Tree<Node>, target: NodeId, source: NodeRef<'_, ParsedNode>) {
    let mut pending = vec![(source, target)];
    while let Some((source, target)) = pending.pop() {
        let Some(mut target) = tree.get_mut(target) else {
            continue;
        };
        for child in source.children() {
            let Some(value) = import_node(child.value()) else {
                continue;
            };
            let id = target.append(value).id();
            if child.has_children() {
                pending.push((child, id));
            }
        }
    }
}

fn import_node(node: &ParsedNode) -> Option<Node> {
    match node {
        ParsedNode::Element(el) => Some(Node::Element(Element {
            name: el.name().to_string(),
            attrs: el
                .attrs
                .iter()
                .map(|(name, value)| {
                    let key = match &name.prefix {
                        Some(prefix) => format!("{prefix}:{}", name.local),
                        None => name.local.to_string(),
                    };
                    (key, value.to_string())
                })
                .collect(),
        })),
        ParsedNode::Text(text) => Some(Node::Text(text.to_string())),
        ParsedNode::Comment(comment) => Some(Node::Comment(comment.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_names(doc: &Document) -> Vec<String> {
        doc.root()
            .descendants()
            .filter_map(|n| n.value().as_element().map(|el| el.name.clone()))
            .collect()
    }

    #[test]
    fn parse_keeps_nesting() {
        let doc = Document::parse(r#"<div><a href="/wiki/Go">Go</a></div>"#).unwrap();
        let div = doc.root().first_child().unwrap();
        assert_eq!(div.value().as_element().unwrap().name, "div");
        let a = div.first_child().unwrap();
        let a_el = a.value().as_element().unwrap();
        assert_eq!(a_el.name, "a");
        assert_eq!(a_el.attr("href"), Some("/wiki/Go"));
        assert_eq!(a.first_child().unwrap().value(), &Node::Text("Go".into()));
    }

    #[test]
    fn parse_closes_unclosed_tags() {
        let doc = Document::parse("<div><p>one<p>two</div>").unwrap();
        assert_eq!(element_names(&doc), vec!["div", "p", "p"]);
        assert_eq!(doc.text_content(), "onetwo");
    }

    #[test]
    fn parse_accepts_unknown_tags() {
        let doc = Document::parse("<wiki-widget data-x=\"1\">hi</wiki-widget>").unwrap();
        assert_eq!(element_names(&doc), vec!["wiki-widget"]);
    }

    #[test]
    fn parse_empty_fragment_yields_bare_root() {
        let doc = Document::parse("").unwrap();
        assert!(doc.root().first_child().is_none());
    }

    #[test]
    fn parse_keeps_comments() {
        let doc = Document::parse("<p>a</p><!-- note -->").unwrap();
        let comment = doc.root().last_child().unwrap();
        assert_eq!(comment.value(), &Node::Comment(" note ".into()));
    }

    #[test]
    fn detach_removes_whole_subtree() {
        let mut doc = Document::parse("<div><span><b>x</b></span><i>y</i></div>").unwrap();
        let span = doc.elements_named("span")[0];
        assert!(doc.detach(span));
        assert!(doc.elements_named("b").is_empty());
        assert_eq!(element_names(&doc), vec!["div", "i"]);
        assert_eq!(doc.text_content(), "y");
    }

    #[test]
    fn root_cannot_be_detached() {
        let mut doc = Document::new();
        let root = doc.root_id();
        assert!(!doc.detach(root));
    }

    #[test]
    fn set_attr_replaces_in_place() {
        let mut el = Element::new("a");
        el.set_attr("href", "/wiki/A");
        el.set_attr("title", "A");
        el.set_attr("href", "https://example.org/wiki/A");
        assert_eq!(
            el.attrs,
            vec![
                ("href".to_string(), "https://example.org/wiki/A".to_string()),
                ("title".to_string(), "A".to_string()),
            ]
        );
    }

    #[test]
    fn update_element_ignores_text_nodes() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let text = doc.append(root, Node::Text("plain".into())).unwrap();
        assert!(doc.update_element(text, |el| el.set_attr("x", "y")).is_none());
    }

    #[test]
    fn parse_survives_deep_nesting() {
        let depth = 20_000;
        let doc = Document::parse(&("<div>".repeat(depth) + "x")).unwrap();
        assert_eq!(doc.elements_named("div").len(), depth);
        assert_eq!(doc.text_content(), "x");
    }

    #[test]
    fn parse_keeps_foreign_attribute_prefixes() {
        let doc = Document::parse(r##"<svg><a xlink:href="#top">up</a></svg>"##).unwrap();
        let a = doc.elements_named("a")[0];
        let el = doc.get(a).unwrap().value().as_element().unwrap().clone();
        assert_eq!(el.attr("xlink:href"), Some("#top"));
        assert_eq!(el.attr("href"), None);
    }

    #[test]
    fn blank_documents() {
        assert!(Document::new().is_blank());
        let wrapper = Document::parse("<div class=\"mw-parser-output\"> <p>\n</p></div>").unwrap();
        assert!(wrapper.is_blank());
        assert!(Document::parse("<div><style>.x{}</style></div>").unwrap().is_blank());
        assert!(!Document::parse("<div><p>text</p></div>").unwrap().is_blank());
        assert!(!Document::parse(r#"<div><img src="map.png"></div>"#).unwrap().is_blank());
    }
}
