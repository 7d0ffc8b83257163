// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Block and rich-text types
//!
//! Notion rejects rich-text items longer than [`MAX_TEXT_LEN`] characters, so
//! every constructor here goes through [`rich_text_chunks`], which splits
//! content into consecutive items on `char` boundaries. A block holds at most
//! [`MAX_RICH_TEXT_ITEMS`] items; [`Block::paragraphs`] and
//! [`Block::code_blocks`] spread longer text over consecutive blocks.

use serde::Serialize;

/// Maximum number of characters in a single rich-text item
pub const MAX_TEXT_LEN: usize = 2000;

/// Maximum number of rich-text items in a single block
pub const MAX_RICH_TEXT_ITEMS: usize = 100;

/// Plain text content of a rich-text item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    /// The text itself
    pub content: String,
}

/// A rich-text item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichText {
    /// Unformatted text
    Text {
        /// Text content
        text: TextContent,
    },
}

impl RichText {
    /// Create a plain text item (no length check)
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self::Text {
            text: TextContent {
                content: content.into(),
            },
        }
    }

    /// Text content of the item
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text { text } => &text.content,
        }
    }
}

/// Split `content` into rich-text items of at most [`MAX_TEXT_LEN`] chars
///
/// Concatenating the returned items yields `content` again. Empty input
/// produces no items.
#[must_use]
pub fn rich_text_chunks(content: &str) -> Vec<RichText> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in content.char_indices() {
        if count == MAX_TEXT_LEN {
            chunks.push(RichText::plain(&content[start..idx]));
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < content.len() {
        chunks.push(RichText::plain(&content[start..]));
    }

    chunks
}

/// Rich-text items for `content`, grouped per block. Always yields at least
/// one (possibly empty) group.
fn rich_text_groups(content: &str) -> Vec<Vec<RichText>> {
    let chunks = rich_text_chunks(content);
    if chunks.is_empty() {
        return vec![Vec::new()];
    }
    chunks
        .chunks(MAX_RICH_TEXT_ITEMS)
        .map(<[RichText]>::to_vec)
        .collect()
}

/// Body of a paragraph block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphBlock {
    /// Paragraph text
    pub rich_text: Vec<RichText>,
}

/// Body of a code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Language used for highlighting, e.g. `markdown`
    pub language: String,
    /// Code text
    pub rich_text: Vec<RichText>,
}

/// Typed content of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    /// A paragraph of text
    Paragraph {
        /// Paragraph body
        paragraph: ParagraphBlock,
    },
    /// A code block
    Code {
        /// Code body
        code: CodeBlock,
    },
}

/// A child block of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    object: &'static str,
    #[serde(flatten)]
    content: BlockContent,
}

impl Block {
    /// Wrap typed content in a block
    #[must_use]
    pub fn new(content: BlockContent) -> Self {
        Self {
            object: "block",
            content,
        }
    }

    /// Create a single paragraph block for short text
    ///
    /// Text longer than `MAX_TEXT_LEN * MAX_RICH_TEXT_ITEMS` characters
    /// needs [`Block::paragraphs`].
    #[must_use]
    pub fn paragraph(text: &str) -> Self {
        Self::new(BlockContent::Paragraph {
            paragraph: ParagraphBlock {
                rich_text: rich_text_chunks(text),
            },
        })
    }

    /// Create as many paragraph blocks as `text` needs
    #[must_use]
    pub fn paragraphs(text: &str) -> Vec<Self> {
        rich_text_groups(text)
            .into_iter()
            .map(|rich_text| {
                Self::new(BlockContent::Paragraph {
                    paragraph: ParagraphBlock { rich_text },
                })
            })
            .collect()
    }

    /// Create as many code blocks as `text` needs, all in `language`
    #[must_use]
    pub fn code_blocks(language: &str, text: &str) -> Vec<Self> {
        rich_text_groups(text)
            .into_iter()
            .map(|rich_text| {
                Self::new(BlockContent::Code {
                    code: CodeBlock {
                        language: language.to_string(),
                        rich_text,
                    },
                })
            })
            .collect()
    }

    /// Typed content of the block
    #[must_use]
    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// Concatenated text of the block
    #[must_use]
    pub fn text(&self) -> String {
        let items = match &self.content {
            BlockContent::Paragraph { paragraph } => &paragraph.rich_text,
            BlockContent::Code { code } => &code.rich_text,
        };
        items.iter().map(RichText::content).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    #[test]
    fn test_paragraph_wire_format() {
        let value = serde_json::to_value(Block::paragraph("hello")).unwrap();
        let expected = json!({
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{"type": "text", "text": {"content": "hello"}}]
            }
        });
        assert!(value == expected, "got {value}");
    }

    #[test]
    fn test_code_wire_format() {
        let blocks = Block::code_blocks("markdown", "# 제목");
        assert_eq!(blocks.len(), 1);
        let value = serde_json::to_value(&blocks[0]).unwrap();
        let expected = json!({
            "object": "block",
            "type": "code",
            "code": {
                "language": "markdown",
                "rich_text": [{"type": "text", "text": {"content": "# 제목"}}]
            }
        });
        assert!(value == expected, "got {value}");
    }

    #[test]
    fn test_chunks_empty() {
        assert!(rich_text_chunks("").is_empty());
    }

    #[test]
    fn test_chunks_exact_limit_is_one_item() {
        let text = "a".repeat(MAX_TEXT_LEN);
        assert_eq!(rich_text_chunks(&text).len(), 1);
    }

    #[test]
    fn test_chunks_split_on_char_boundaries() {
        // Hangul is three bytes per char in UTF-8
        let text = "회".repeat(MAX_TEXT_LEN + 1);
        let chunks = rich_text_chunks(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content().chars().count(), MAX_TEXT_LEN);
        assert_eq!(chunks[1].content(), "회");
    }

    #[test]
    fn test_block_text_joins_chunks() {
        let text = "x".repeat(MAX_TEXT_LEN * 2 + 10);
        let blocks = Block::code_blocks("markdown", &text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), text);
    }

    #[test]
    fn test_long_text_spreads_over_blocks() {
        let text = "x".repeat(MAX_TEXT_LEN * MAX_RICH_TEXT_ITEMS + 1);
        let blocks = Block::code_blocks("markdown", &text);
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            let BlockContent::Code { code } = block.content() else {
                panic!("expected a code block");
            };
            assert!(code.rich_text.len() <= MAX_RICH_TEXT_ITEMS);
            assert_eq!(code.language, "markdown");
        }
        let joined: String = blocks.iter().map(Block::text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_empty_text_is_one_empty_block() {
        let blocks = Block::paragraphs("");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "");
    }
}
