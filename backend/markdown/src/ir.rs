//! Markup Intermediate Representation
//!
//! Strongly-typed nodes for the informal markup dialect that chat messages
//! carry. A `ParsedMessage` is built fresh from the raw string on every
//! render and is never mutated afterwards; the renderer adapters only ever
//! project this closed set of variants, so message text is always treated
//! as data and never as markup to re-interpret.

use serde::{Deserialize, Serialize};

/// Styling flags carried by a [`InlineNode::Styled`] run.
///
/// A run with no flags set is represented as [`InlineNode::Text`] instead,
/// so `Styled` nodes always carry at least one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleSet {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
}

impl StyleSet {
    pub const fn bold() -> Self {
        Self {
            bold: true,
            italic: false,
            underline: false,
            strikethrough: false,
        }
    }

    pub const fn italic() -> Self {
        Self {
            bold: false,
            italic: true,
            underline: false,
            strikethrough: false,
        }
    }

    pub const fn bold_italic() -> Self {
        Self {
            bold: true,
            italic: true,
            underline: false,
            strikethrough: false,
        }
    }

    pub const fn underline() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: true,
            strikethrough: false,
        }
    }

    pub const fn strikethrough() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.strikethrough)
    }
}

/// A span-level unit within a block's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineNode {
    Text { content: String },
    Styled { content: String, style: StyleSet },
    InlineCode { content: String },
    Link { label: String, href: String },
    Image { alt: String, src: String },
    LineBreak,
}

impl InlineNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// The visible text this node contributes, markup delimiters excluded.
    /// `Link` contributes its label, `Image` its alt text, `LineBreak` a
    /// newline.
    pub fn visible_text(&self) -> &str {
        match self {
            Self::Text { content } | Self::Styled { content, .. } | Self::InlineCode { content } => {
                content
            }
            Self::Link { label, .. } => label,
            Self::Image { alt, .. } => alt,
            Self::LineBreak => "\n",
        }
    }
}

/// A top-level structural unit of a parsed message. Order is source order;
/// no reordering or deduplication ever happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    CodeBlock {
        /// Language tag from the opening fence; empty when absent.
        language: String,
        code: String,
    },
    Heading {
        /// 1..=6, from the number of `#` markers.
        level: u8,
        inline: Vec<InlineNode>,
    },
    Blockquote {
        inline: Vec<InlineNode>,
    },
    List {
        ordered: bool,
        /// One inline sequence per item; items never nest.
        items: Vec<Vec<InlineNode>>,
    },
    Paragraph {
        inline: Vec<InlineNode>,
    },
}

/// The parsed form of a single chat message: an ordered block sequence plus
/// whether the tool-use sentinel was found (and stripped) in the source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub tool_use: bool,
}

impl ParsedMessage {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_set_is_empty() {
        assert!(StyleSet::default().is_empty());
        assert!(!StyleSet::bold().is_empty());
        assert!(!StyleSet::strikethrough().is_empty());
    }

    #[test]
    fn test_inline_node_visible_text() {
        let link = InlineNode::Link {
            label: "docs".to_string(),
            href: "https://example.com".to_string(),
        };
        assert_eq!(link.visible_text(), "docs");
        assert_eq!(InlineNode::LineBreak.visible_text(), "\n");
    }

    #[test]
    fn test_block_serializes_tagged() {
        let block = Block::Heading {
            level: 2,
            inline: vec![InlineNode::text("Title")],
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["inline"][0]["type"], "text");
    }
}
