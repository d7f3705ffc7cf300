//! Multimodal rendering core for Dharma chat transcripts.
//!
//! Converts the informal markup dialect of assistant replies into a typed
//! block/inline node sequence, then projects it for the contexts that
//! consume it: a display-safe tree for the chat UI and plain narratable
//! text for clipboard, share, and speech synthesis.
//!
//! Parsing is a pure, synchronous, total function of the input string: no
//! input raises, malformed fencing degrades to more-text-as-code, and
//! every render rebuilds the structures from scratch.

pub mod code_block;
pub mod inline;
pub mod ir;
pub mod renderer;
pub mod segment;

pub use ir::{Block, InlineNode, ParsedMessage, StyleSet};
pub use renderer::{DisplayNode, Renderer};
pub use segment::Segment;

use dharma_core::TOOL_USE_MARKER;

/// Parse a raw message string into its block sequence.
///
/// Strips the tool-use sentinel (flagging the message), splits prose from
/// fenced code, and runs the inline formatter over each prose segment.
pub fn parse(content: &str) -> ParsedMessage {
    let tool_use = content.contains(TOOL_USE_MARKER);
    let text: std::borrow::Cow<'_, str> = if tool_use {
        content.replace(TOOL_USE_MARKER, "").into()
    } else {
        content.into()
    };

    let mut blocks = Vec::new();
    for seg in segment::segment(&text) {
        match seg {
            Segment::Prose(prose) => blocks.extend(inline::format_prose(&prose)),
            code @ Segment::Code { .. } => blocks.extend(code_block::build(code)),
        }
    }

    ParsedMessage { blocks, tool_use }
}
