//! Tree sanitizers that clean up a parsed article before it is re-emitted.
//!
//! Sanitizers implement the [`TreeSanitizer`] trait and are composed into a
//! [`SanitizerPipeline`] that runs them sequentially over one [`Document`].
//!
//! Built-in sanitizers:
//!
//! - [`PruneRule`] -- removes whole subtrees matched by tag and attribute.
//! - [`LinkRewriter`] -- turns site-relative links into absolute URLs.

mod links;
mod prune;

pub use links::{FragmentPolicy, LinkRewriter};
pub use prune::PruneRule;

use crate::dom::Document;

/// Trait for in-place document transforms.
///
/// Implementations must be `Send + Sync` so a configured pipeline can be
/// shared between request handlers.
pub trait TreeSanitizer: Send + Sync {
    /// Transform the document in place, returning how many nodes changed.
    fn apply(&self, doc: &mut Document) -> usize;
}

/// An ordered chain of [`TreeSanitizer`] implementations.
///
/// Each sanitizer sees the tree as left by the previous one. An empty
/// pipeline is a no-op.
#[derive(Default)]
pub struct SanitizerPipeline {
    sanitizers: Vec<Box<dyn TreeSanitizer>>,
}

impl SanitizerPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            sanitizers: Vec::new(),
        }
    }

    /// Append a sanitizer to the end of the pipeline.
    pub fn add(&mut self, sanitizer: impl TreeSanitizer + 'static) {
        self.sanitizers.push(Box::new(sanitizer));
    }

    /// Run every sanitizer in order, returning the total number of changes.
    pub fn apply(&self, doc: &mut Document) -> usize {
        self.sanitizers.iter().map(|s| s.apply(doc)).sum()
    }

    /// Returns `true` if no sanitizers have been added.
    pub fn is_empty(&self) -> bool {
        self.sanitizers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sanitizers.len()
    }
}
