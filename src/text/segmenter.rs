//! Line-based segmentation of plain-text extracts.

use serde::Serialize;

pub const MIN_HEADING_LEVEL: u8 = 2;
pub const MAX_HEADING_LEVEL: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading { level: u8 },
    Paragraph,
}

/// One heading or paragraph of an extract. `text` is trimmed and never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentBlock {
    #[serde(flatten)]
    pub kind: BlockKind,
    pub text: String,
}

impl ContentBlock {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading { level },
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
        }
    }
}

/// Split an extract into headings and paragraphs, one block per non-blank
/// line, in source order.
///
/// A line wrapped in `==` markers is a heading whose level is the number of
/// leading `=` signs. Levels outside 2..=6, and markers with nothing between
/// them, are kept as paragraphs with the markers intact.
///
/// ```
/// use wiki_render::{ContentBlock, segment};
///
/// let blocks = segment("Intro line.\n\n== History ==\nFirst release.");
/// assert_eq!(blocks, vec![
///     ContentBlock::paragraph("Intro line."),
///     ContentBlock::heading(2, "History"),
///     ContentBlock::paragraph("First release."),
/// ]);
/// ```
pub fn segment(extract: &str) -> Vec<ContentBlock> {
    extract
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

fn classify_line(line: &str) -> ContentBlock {
    let Some(level) = heading_level(line) else {
        return ContentBlock::paragraph(line);
    };
    let text = line.trim_matches('=').trim();
    if text.is_empty() {
        ContentBlock::paragraph(line)
    } else {
        ContentBlock::heading(level, text)
    }
}

fn heading_level(line: &str) -> Option<u8> {
    if !(line.starts_with("==") && line.ends_with("==")) {
        return None;
    }
    let token = line.split_whitespace().next()?;
    let count = token.chars().take_while(|&c| c == '=').count();
    u8::try_from(count)
        .ok()
        .filter(|level| (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_two_heading() {
        assert_eq!(segment("== Title =="), vec![ContentBlock::heading(2, "Title")]);
    }

    #[test]
    fn level_three_heading() {
        assert_eq!(segment("=== Sub ==="), vec![ContentBlock::heading(3, "Sub")]);
    }

    #[test]
    fn heading_without_spaces() {
        assert_eq!(segment("====Deep===="), vec![ContentBlock::heading(4, "Deep")]);
    }

    #[test]
    fn level_six_is_still_a_heading() {
        assert_eq!(
            segment("====== Six ======"),
            vec![ContentBlock::heading(6, "Six")]
        );
    }

    #[test]
    fn level_seven_is_a_paragraph() {
        assert_eq!(
            segment("======= X ======="),
            vec![ContentBlock::paragraph("======= X =======")]
        );
    }

    #[test]
    fn single_equals_is_a_paragraph() {
        assert_eq!(segment("= Top ="), vec![ContentBlock::paragraph("= Top =")]);
    }

    #[test]
    fn unterminated_marker_is_a_paragraph() {
        assert_eq!(
            segment("== Not closed"),
            vec![ContentBlock::paragraph("== Not closed")]
        );
    }

    #[test]
    fn bare_markers_are_paragraphs() {
        assert_eq!(
            segment("==\n===="),
            vec![ContentBlock::paragraph("=="), ContentBlock::paragraph("====")]
        );
    }

    #[test]
    fn blank_lines_are_dropped_and_order_kept() {
        let extract = "  Go is a language.  \n\n\t\n== History ==\r\nDesigned at Google.\nReleased in 2009.\n\n=== Versions ===\n";
        let blocks = segment(extract);
        assert_eq!(blocks.len(), 5);
        assert_eq!(
            blocks,
            vec![
                ContentBlock::paragraph("Go is a language."),
                ContentBlock::heading(2, "History"),
                ContentBlock::paragraph("Designed at Google."),
                ContentBlock::paragraph("Released in 2009."),
                ContentBlock::heading(3, "Versions"),
            ]
        );
    }

    #[test]
    fn block_count_matches_non_blank_lines() {
        let extract = "a\n\n b \n== c ==\n\n\nd\n   \n";
        let non_blank = extract.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(segment(extract).len(), non_blank);
    }

    #[test]
    fn empty_extract_has_no_blocks() {
        assert!(segment("").is_empty());
        assert!(segment("\n \n\t").is_empty());
    }

    #[test]
    fn blocks_serialize_with_type_tag() {
        let json = serde_json::to_value(vec![
            ContentBlock::heading(2, "History"),
            ContentBlock::paragraph("Text"),
        ])
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"type": "heading", "level": 2, "text": "History"},
                {"type": "paragraph", "text": "Text"},
            ])
        );
    }
}
