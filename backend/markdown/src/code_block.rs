//! Code Block Builder
//!
//! Turns a fenced segment into a `CodeBlock` node. Code content is opaque:
//! no inline rule ever runs inside it. The language tag is forwarded so the
//! syntax-highlighting collaborator can pick a grammar; unknown or empty
//! tags fall back to plain monospace.

use crate::ir::{Block, ParsedMessage};
use crate::segment::Segment;

/// Build the single `CodeBlock` node for a fenced segment.
/// Prose segments are not this module's business and return `None`.
pub fn build(segment: Segment) -> Option<Block> {
    match segment {
        Segment::Code { language, body } => Some(Block::CodeBlock {
            language,
            code: body,
        }),
        Segment::Prose(_) => None,
    }
}

/// Resolve a fence language tag to a highlighter grammar name.
///
/// Common short tags are widened to the grammar names highlighters ship
/// with. Unknown tags return `None`, which renders as plain monospace.
pub fn grammar_for(language: &str) -> Option<&'static str> {
    let tag = language.trim().to_ascii_lowercase();
    let grammar = match tag.as_str() {
        "rust" | "rs" => "rust",
        "python" | "py" => "python",
        "javascript" | "js" | "jsx" => "javascript",
        "typescript" | "ts" | "tsx" => "typescript",
        "shell" | "sh" | "bash" | "zsh" => "bash",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "html" => "html",
        "css" => "css",
        "sql" => "sql",
        "c" => "c",
        "cpp" | "c++" => "cpp",
        "go" | "golang" => "go",
        "java" => "java",
        "ruby" | "rb" => "ruby",
        "markdown" | "md" => "markdown",
        _ => return None,
    };
    Some(grammar)
}

/// Collect `(language, code)` pairs from a parsed message, in source order.
/// Feeds the per-block copy-code affordance in the message bubble.
pub fn extract_blocks(msg: &ParsedMessage) -> Vec<(&str, &str)> {
    msg.blocks
        .iter()
        .filter_map(|block| match block {
            Block::CodeBlock { language, code } => Some((language.as_str(), code.as_str())),
            _ => None,
        })
        .collect()
}
