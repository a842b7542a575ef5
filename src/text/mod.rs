//! Plain-text helpers: extract segmentation and tag stripping.

mod segmenter;
mod stripper;

pub use segmenter::{BlockKind, ContentBlock, MAX_HEADING_LEVEL, MIN_HEADING_LEVEL, segment};
pub use stripper::{first_paragraph, strip};
