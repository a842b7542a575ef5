//! Subtree removal by tag name and attribute substring.

use ego_tree::NodeId;

use super::TreeSanitizer;
use crate::dom::{Document, Node};

/// Removes every element named `tag_name` whose `attribute_key` attribute
/// contains `value_contains`, together with everything beneath it.
///
/// # Example
///
/// ```
/// use wiki_render::{Document, PruneRule, TreeSanitizer, serialize};
///
/// let mut doc = Document::parse(
///     r#"<table class="infobox biography"><tr><td>Born</td></tr></table><p>Text</p>"#,
/// ).unwrap();
/// PruneRule::infobox().apply(&mut doc);
/// assert_eq!(serialize(&doc), "<p>Text</p>");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PruneRule {
    pub tag_name: String,
    pub attribute_key: String,
    pub value_contains: String,
}

impl PruneRule {
    pub fn new(
        tag_name: impl Into<String>,
        attribute_key: impl Into<String>,
        value_contains: impl Into<String>,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            attribute_key: attribute_key.into(),
            value_contains: value_contains.into(),
        }
    }

    /// The summary table at the top of most articles.
    pub fn infobox() -> Self {
        Self::new("table", "class", "infobox")
    }

    /// The `[edit]` links next to section headings.
    pub fn edit_section() -> Self {
        Self::new("span", "class", "mw-editsection")
    }

    pub fn matches(&self, node: &Node) -> bool {
        node.as_element().is_some_and(|el| {
            el.name == self.tag_name
                && el
                    .attr(&self.attribute_key)
                    .is_some_and(|v| v.contains(self.value_contains.as_str()))
        })
    }

    fn prune_below(&self, doc: &mut Document, parent: NodeId) -> usize {
        let mut removed = 0;
        // pre-order: a node's first child is pushed after its next sibling
        let mut cursors: Vec<NodeId> = doc.first_child(parent).into_iter().collect();
        while let Some(id) = cursors.pop() {
            // capture the sibling before `id` is detached
            if let Some(next) = doc.next_sibling(id) {
                cursors.push(next);
            }
            if doc.get(id).is_some_and(|n| self.matches(n.value())) {
                doc.detach(id);
                removed += 1;
            } else if let Some(child) = doc.first_child(id) {
                cursors.push(child);
            }
        }
        removed
    }
}

impl TreeSanitizer for PruneRule {
    fn apply(&self, doc: &mut Document) -> usize {
        let root = doc.root_id();
        let removed = self.prune_below(doc, root);
        if removed > 0 {
            tracing::debug!(
                "Pruned {removed} <{}> subtrees with {}~={:?}",
                self.tag_name,
                self.attribute_key,
                self.value_contains
            );
        }
        removed
    }
}
