//! Renderer Adapters
//!
//! Two pure projections of a parsed message: a structured display tree for
//! the UI layer, and plain narratable text for clipboard, share, and the
//! speech-synthesis collaborator. Presentation only ever comes from the
//! closed node-variant set below; message text rides along as data, so a
//! message can never inject markup into the surface that renders it.

use serde::{Deserialize, Serialize};

use crate::code_block::grammar_for;
use crate::ir::{Block, InlineNode, ParsedMessage, StyleSet};

/// A display-safe presentation node. Serialized as a tagged JSON tree for
/// the UI collaborator; every text field is literal data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayNode {
    Heading {
        level: u8,
        children: Vec<DisplayNode>,
    },
    Paragraph {
        children: Vec<DisplayNode>,
    },
    Blockquote {
        children: Vec<DisplayNode>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<DisplayNode>>,
    },
    CodeBlock {
        /// Raw language tag, for the block header label.
        language: String,
        /// Resolved highlighter grammar; `None` renders plain monospace.
        grammar: Option<String>,
        code: String,
    },
    Span {
        text: String,
        style: StyleSet,
    },
    InlineCode {
        text: String,
    },
    Link {
        text: String,
        href: String,
    },
    Image {
        alt: String,
        src: String,
    },
    LineBreak,
    /// Stands in for the tool-use sentinel the assistant pipeline embeds.
    ToolUseBadge,
}

/// Schemes a link may navigate to. Anything else (`javascript:`, `file:`,
/// unknown protocols) is demoted to its visible text.
fn safe_href(url: &str) -> bool {
    let u = url.trim().to_ascii_lowercase();
    u.starts_with("http://") || u.starts_with("https://") || u.starts_with("mailto:")
}

/// Schemes an image may load from. Inline `data:image/` payloads are
/// allowed because tool results (QR codes) arrive that way.
fn safe_src(url: &str) -> bool {
    let u = url.trim().to_ascii_lowercase();
    u.starts_with("http://") || u.starts_with("https://") || u.starts_with("data:image/")
}

pub struct Renderer;

impl Renderer {
    /// Project a parsed message onto the display tree.
    pub fn to_display_tree(msg: &ParsedMessage) -> Vec<DisplayNode> {
        let mut nodes = Vec::with_capacity(msg.blocks.len() + 1);
        if msg.tool_use {
            nodes.push(DisplayNode::ToolUseBadge);
        }
        for block in &msg.blocks {
            match block {
                Block::CodeBlock { language, code } => nodes.push(DisplayNode::CodeBlock {
                    language: language.clone(),
                    grammar: grammar_for(language).map(str::to_string),
                    code: code.clone(),
                }),
                Block::Heading { level, inline } => nodes.push(DisplayNode::Heading {
                    level: *level,
                    children: Self::inline_tree(inline),
                }),
                Block::Blockquote { inline } => nodes.push(DisplayNode::Blockquote {
                    children: Self::inline_tree(inline),
                }),
                Block::List { ordered, items } => nodes.push(DisplayNode::List {
                    ordered: *ordered,
                    items: items.iter().map(|item| Self::inline_tree(item)).collect(),
                }),
                Block::Paragraph { inline } => {
                    // Spacing-only paragraphs exist for plain-text fidelity;
                    // the display layer has its own block spacing.
                    if inline.iter().any(|n| !matches!(n, InlineNode::LineBreak)) {
                        nodes.push(DisplayNode::Paragraph {
                            children: Self::inline_tree(inline),
                        });
                    }
                }
            }
        }
        nodes
    }

    fn inline_tree(inline: &[InlineNode]) -> Vec<DisplayNode> {
        inline
            .iter()
            .map(|node| match node {
                InlineNode::Text { content } => DisplayNode::Span {
                    text: content.clone(),
                    style: StyleSet::default(),
                },
                InlineNode::Styled { content, style } => DisplayNode::Span {
                    text: content.clone(),
                    style: *style,
                },
                InlineNode::InlineCode { content } => DisplayNode::InlineCode {
                    text: content.clone(),
                },
                InlineNode::Link { label, href } => {
                    if safe_href(href) {
                        DisplayNode::Link {
                            text: label.clone(),
                            href: href.clone(),
                        }
                    } else {
                        DisplayNode::Span {
                            text: label.clone(),
                            style: StyleSet::default(),
                        }
                    }
                }
                InlineNode::Image { alt, src } => {
                    if safe_src(src) {
                        DisplayNode::Image {
                            alt: alt.clone(),
                            src: src.clone(),
                        }
                    } else {
                        DisplayNode::Span {
                            text: alt.clone(),
                            style: StyleSet::default(),
                        }
                    }
                }
                InlineNode::LineBreak => DisplayNode::LineBreak,
            })
            .collect()
    }

    /// Project a parsed message onto plain narratable text.
    ///
    /// Styling is stripped, links and images collapse to their label/alt
    /// text, code bodies appear as-is prefixed by their language tag, and
    /// the tool-use sentinel is omitted. This is the exact string handed to
    /// the clipboard, the share sheet, and the speech collaborator.
    pub fn to_plain_text(msg: &ParsedMessage) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(msg.blocks.len());
        for block in &msg.blocks {
            match block {
                Block::CodeBlock { language, code } => {
                    if language.is_empty() {
                        parts.push(code.clone());
                    } else {
                        parts.push(format!("{language}\n{code}"));
                    }
                }
                Block::Heading { inline, .. }
                | Block::Blockquote { inline }
                | Block::Paragraph { inline } => parts.push(Self::inline_text(inline)),
                Block::List { items, .. } => {
                    let lines: Vec<String> =
                        items.iter().map(|item| Self::inline_text(item)).collect();
                    parts.push(lines.join("\n"));
                }
            }
        }
        parts.join("\n\n")
    }

    fn inline_text(inline: &[InlineNode]) -> String {
        inline.iter().map(|node| node.visible_text()).collect()
    }
}
