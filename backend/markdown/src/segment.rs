//! Fence Segmenter
//!
//! Splits raw message text into alternating prose and fenced-code segments.
//! Total over all inputs: malformed fencing degrades to "more text treated
//! as code", never to an error or dropped content.

/// A raw slice of the message, before inline formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Prose(String),
    Code {
        /// Language token from the opening fence line, trimmed; empty when
        /// no token was given.
        language: String,
        body: String,
    },
}

const FENCE: &str = "```";

/// Split `text` into prose and code segments.
///
/// A fence is a line starting with three backticks; the remainder of that
/// line is the language token. Everything up to the next fence line is the
/// code body, with the trailing newline normalized onto terminated bodies.
/// Fences never nest: a fence line seen inside code always closes, and an
/// unterminated fence consumes the rest of the message as code.
pub fn segment(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut segments = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    // After a closed fence, one empty line is the visual separator between
    // the code block and the following prose, not paragraph content.
    let mut skip_leading_blank = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if let Some(tag) = line.strip_prefix(FENCE) {
            flush_prose(&mut segments, &mut prose, true);
            let language = tag.trim().to_string();
            i += 1;

            let mut body_lines: Vec<&str> = Vec::new();
            let mut terminated = false;
            while i < lines.len() {
                let l = lines[i];
                i += 1;
                if l.starts_with(FENCE) {
                    terminated = true;
                    break;
                }
                body_lines.push(l);
            }

            let mut body = body_lines.join("\n");
            if terminated && !body_lines.is_empty() {
                body.push('\n');
            }
            segments.push(Segment::Code { language, body });
            skip_leading_blank = true;
        } else {
            if skip_leading_blank && prose.is_empty() && line.is_empty() {
                skip_leading_blank = false;
                i += 1;
                continue;
            }
            skip_leading_blank = false;
            prose.push(line);
            i += 1;
        }
    }

    flush_prose(&mut segments, &mut prose, false);
    segments
}

fn flush_prose(segments: &mut Vec<Segment>, prose: &mut Vec<&str>, before_fence: bool) {
    // The blank line abutting an opening fence is the separator already
    // implied by the block boundary; keep it out of the prose segment.
    if before_fence && prose.last().is_some_and(|l| l.is_empty()) {
        prose.pop();
    }
    if prose.is_empty() {
        return;
    }
    let text = prose.join("\n");
    prose.clear();
    if !text.is_empty() {
        segments.push(Segment::Prose(text));
    }
}
