//! Inline Formatter
//!
//! Turns a prose segment into Heading/Blockquote/List/Paragraph blocks of
//! typed inline nodes. Inline rules run as span-splitting passes in a fixed
//! precedence order: each rule only inspects text that no earlier rule has
//! claimed, so the ambiguous-overlap bugs of sequential string substitution
//! (bold swallowing italic, links re-matched as autolinks) cannot occur.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ir::{Block, InlineNode, StyleSet};

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());
static AUTOLINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s<>`]+").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\*([^*]+)\*\*\*|\*\*_([^_]+)_\*\*").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([^_]+)__").unwrap());
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~([^~]+)~~").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. ").unwrap());

/// Intermediate state of a line while the rule passes run: text still open
/// for matching, or a node an earlier rule already produced.
enum Piece {
    Plain(String),
    Done(InlineNode),
}

fn apply_rule<F>(pieces: Vec<Piece>, re: &Regex, build: F) -> Vec<Piece>
where
    F: Fn(&Captures) -> InlineNode,
{
    let mut out = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let text = match piece {
            Piece::Done(node) => {
                out.push(Piece::Done(node));
                continue;
            }
            Piece::Plain(text) => text,
        };
        let mut last = 0;
        for caps in re.captures_iter(&text) {
            let m = caps.get(0).unwrap();
            if m.start() > last {
                out.push(Piece::Plain(text[last..m.start()].to_string()));
            }
            out.push(Piece::Done(build(&caps)));
            last = m.end();
        }
        if last < text.len() {
            out.push(Piece::Plain(text[last..].to_string()));
        }
    }
    out
}

fn styled(m: Option<regex::Match>, style: StyleSet) -> InlineNode {
    InlineNode::Styled {
        content: m.map(|m| m.as_str().to_string()).unwrap_or_default(),
        style,
    }
}

/// Format one line of prose into inline nodes, applying the rule passes in
/// precedence order: image, link, autolink, inline code, bold-italic, bold,
/// italic, underline, strikethrough.
pub fn format_inline(line: &str) -> Vec<InlineNode> {
    let mut pieces = vec![Piece::Plain(line.to_string())];
    pieces = apply_rule(pieces, &IMAGE, |c| InlineNode::Image {
        alt: c[1].to_string(),
        src: c[2].to_string(),
    });
    pieces = apply_rule(pieces, &LINK, |c| InlineNode::Link {
        label: c[1].to_string(),
        href: c[2].to_string(),
    });
    pieces = apply_rule(pieces, &AUTOLINK, |c| InlineNode::Link {
        label: c[0].to_string(),
        href: c[0].to_string(),
    });
    pieces = apply_rule(pieces, &INLINE_CODE, |c| InlineNode::InlineCode {
        content: c[1].to_string(),
    });
    pieces = apply_rule(pieces, &BOLD_ITALIC, |c| {
        styled(c.get(1).or_else(|| c.get(2)), StyleSet::bold_italic())
    });
    pieces = apply_rule(pieces, &BOLD, |c| styled(c.get(1), StyleSet::bold()));
    pieces = apply_rule(pieces, &ITALIC, |c| styled(c.get(1), StyleSet::italic()));
    pieces = apply_rule(pieces, &UNDERLINE, |c| styled(c.get(1), StyleSet::underline()));
    pieces = apply_rule(pieces, &STRIKETHROUGH, |c| {
        styled(c.get(1), StyleSet::strikethrough())
    });

    pieces
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Plain(s) if s.is_empty() => None,
            Piece::Plain(s) => Some(InlineNode::Text { content: s }),
            Piece::Done(node) => Some(node),
        })
        .collect()
}

enum LineKind<'a> {
    Blank,
    Heading { level: u8, rest: &'a str },
    Quote(&'a str),
    Item { ordered: bool, rest: &'a str },
    Plain(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return LineKind::Heading {
                level: hashes as u8,
                rest,
            };
        }
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return LineKind::Quote(rest);
    }
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return LineKind::Item {
                ordered: false,
                rest,
            };
        }
    }
    if let Some(m) = ORDERED_ITEM.find(line) {
        return LineKind::Item {
            ordered: true,
            rest: &line[m.end()..],
        };
    }
    LineKind::Plain(line)
}

fn flush_para(blocks: &mut Vec<Block>, para: &mut Vec<InlineNode>) {
    if !para.is_empty() {
        blocks.push(Block::Paragraph {
            inline: std::mem::take(para),
        });
    }
}

fn flush_quote(blocks: &mut Vec<Block>, quote: &mut Vec<InlineNode>) {
    if !quote.is_empty() {
        blocks.push(Block::Blockquote {
            inline: std::mem::take(quote),
        });
    }
}

fn flush_list(blocks: &mut Vec<Block>, list: &mut Option<(bool, Vec<Vec<InlineNode>>)>) {
    if let Some((ordered, items)) = list.take() {
        blocks.push(Block::List { ordered, items });
    }
}

/// Format a prose segment into blocks.
///
/// Line-level markers (headings, `> ` quotes, list items) take precedence;
/// contiguous quote lines merge into one blockquote and contiguous items of
/// the same kind into one list. Everything else joins the current
/// paragraph, where a lone newline becomes a `LineBreak` node and a blank
/// line is a paragraph break. Blank lines beyond the break and trailing
/// newlines are kept as explicit `LineBreak` nodes so markup-free text
/// survives the plain-text projection byte for byte.
pub fn format_prose(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut para: Vec<InlineNode> = Vec::new();
    let mut quote: Vec<InlineNode> = Vec::new();
    let mut list: Option<(bool, Vec<Vec<InlineNode>>)> = None;
    // Consecutive empty lines since the last content line. The first one
    // after paragraph content is the paragraph break itself; the rest are
    // owed to the output as explicit line breaks.
    let mut pending_blanks = 0usize;

    for line in text.split('\n') {
        match classify(line) {
            LineKind::Blank => {
                flush_quote(&mut blocks, &mut quote);
                flush_list(&mut blocks, &mut list);
                flush_para(&mut blocks, &mut para);
                pending_blanks += 1;
            }
            LineKind::Plain(l) => {
                flush_quote(&mut blocks, &mut quote);
                flush_list(&mut blocks, &mut list);
                if para.is_empty() {
                    let owed = if blocks.is_empty() {
                        pending_blanks
                    } else {
                        pending_blanks.saturating_sub(1)
                    };
                    for _ in 0..owed {
                        para.push(InlineNode::LineBreak);
                    }
                } else {
                    para.push(InlineNode::LineBreak);
                }
                para.extend(format_inline(l));
                pending_blanks = 0;
            }
            LineKind::Heading { level, rest } => {
                flush_quote(&mut blocks, &mut quote);
                flush_list(&mut blocks, &mut list);
                flush_para(&mut blocks, &mut para);
                pending_blanks = 0;
                blocks.push(Block::Heading {
                    level,
                    inline: format_inline(rest),
                });
            }
            LineKind::Quote(rest) => {
                flush_list(&mut blocks, &mut list);
                flush_para(&mut blocks, &mut para);
                pending_blanks = 0;
                if !quote.is_empty() {
                    quote.push(InlineNode::LineBreak);
                }
                quote.extend(format_inline(rest));
            }
            LineKind::Item { ordered, rest } => {
                flush_quote(&mut blocks, &mut quote);
                flush_para(&mut blocks, &mut para);
                pending_blanks = 0;
                match &mut list {
                    Some((ord, items)) if *ord == ordered => items.push(format_inline(rest)),
                    _ => {
                        flush_list(&mut blocks, &mut list);
                        list = Some((ordered, vec![format_inline(rest)]));
                    }
                }
            }
        }
    }

    flush_quote(&mut blocks, &mut quote);
    flush_list(&mut blocks, &mut list);
    flush_para(&mut blocks, &mut para);

    if pending_blanks > 0 {
        // Trailing newlines: attach to the last paragraph so the plain-text
        // projection reproduces them. n blank lines at end of input mean
        // n trailing newline characters after that paragraph's content.
        if let Some(Block::Paragraph { inline }) = blocks.last_mut() {
            for _ in 0..pending_blanks {
                inline.push(InlineNode::LineBreak);
            }
        } else if blocks.is_empty() && pending_blanks > 1 {
            // Input was nothing but newlines.
            let mut inline = Vec::new();
            for _ in 0..pending_blanks - 1 {
                inline.push(InlineNode::LineBreak);
            }
            blocks.push(Block::Paragraph { inline });
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn para(inline: Vec<InlineNode>) -> Block {
        Block::Paragraph { inline }
    }

    fn text(s: &str) -> InlineNode {
        InlineNode::text(s)
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(format_inline("hello"), vec![text("hello")]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            format_inline("**bold**"),
            vec![InlineNode::Styled {
                content: "bold".to_string(),
                style: StyleSet::bold(),
            }]
        );
    }

    #[test]
    fn test_bold_does_not_swallow_italic() {
        assert_eq!(
            format_inline("**b** and *i*"),
            vec![
                InlineNode::Styled {
                    content: "b".to_string(),
                    style: StyleSet::bold(),
                },
                text(" and "),
                InlineNode::Styled {
                    content: "i".to_string(),
                    style: StyleSet::italic(),
                },
            ]
        );
    }

    #[test]
    fn test_bold_italic_combined() {
        assert_eq!(
            format_inline("***x***"),
            vec![InlineNode::Styled {
                content: "x".to_string(),
                style: StyleSet::bold_italic(),
            }]
        );
        assert_eq!(
            format_inline("**_x_**"),
            vec![InlineNode::Styled {
                content: "x".to_string(),
                style: StyleSet::bold_italic(),
            }]
        );
    }

    #[test]
    fn test_underline_and_strikethrough() {
        assert_eq!(
            format_inline("__u__ ~~s~~"),
            vec![
                InlineNode::Styled {
                    content: "u".to_string(),
                    style: StyleSet::underline(),
                },
                text(" "),
                InlineNode::Styled {
                    content: "s".to_string(),
                    style: StyleSet::strikethrough(),
                },
            ]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            format_inline("[x](http://e.com)"),
            vec![InlineNode::Link {
                label: "x".to_string(),
                href: "http://e.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_image_takes_precedence_over_link() {
        assert_eq!(
            format_inline("![alt](img.png)"),
            vec![InlineNode::Image {
                alt: "alt".to_string(),
                src: "img.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_autolink() {
        assert_eq!(
            format_inline("see https://e.com now"),
            vec![
                text("see "),
                InlineNode::Link {
                    label: "https://e.com".to_string(),
                    href: "https://e.com".to_string(),
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_link_href_not_rematched_as_autolink() {
        let nodes = format_inline("[x](https://e.com)");
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], InlineNode::Link { label, .. } if label == "x"));
    }

    #[test]
    fn test_inline_code_content_is_opaque_to_styles() {
        assert_eq!(
            format_inline("`**not bold**`"),
            vec![InlineNode::InlineCode {
                content: "**not bold**".to_string(),
            }]
        );
    }

    #[test]
    fn test_styled_nodes_never_have_empty_style() {
        for input in ["**b**", "*i*", "***bi***", "__u__", "~~s~~"] {
            for node in format_inline(input) {
                if let InlineNode::Styled { style, .. } = node {
                    assert!(!style.is_empty(), "empty style from {input:?}");
                }
            }
        }
    }

    #[test]
    fn test_heading_line() {
        assert_eq!(
            format_prose("## Title"),
            vec![Block::Heading {
                level: 2,
                inline: vec![text("Title")],
            }]
        );
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        let blocks = format_prose("####### nope");
        assert_eq!(blocks, vec![para(vec![text("####### nope")])]);
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let blocks = format_prose("#hashtag");
        assert_eq!(blocks, vec![para(vec![text("#hashtag")])]);
    }

    #[test]
    fn test_contiguous_quote_lines_merge() {
        assert_eq!(
            format_prose("> a\n> b"),
            vec![Block::Blockquote {
                inline: vec![text("a"), InlineNode::LineBreak, text("b")],
            }]
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            format_prose("- one\n- two"),
            vec![Block::List {
                ordered: false,
                items: vec![vec![text("one")], vec![text("two")]],
            }]
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            format_prose("1. one\n2. two"),
            vec![Block::List {
                ordered: true,
                items: vec![vec![text("one")], vec![text("two")]],
            }]
        );
    }

    #[test]
    fn test_list_kind_switch_starts_new_list() {
        let blocks = format_prose("- a\n1. b");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::List { ordered: false, .. }));
        assert!(matches!(&blocks[1], Block::List { ordered: true, .. }));
    }

    #[test]
    fn test_star_item_requires_space() {
        // "*x*" is italic, "* x" is a list item.
        assert!(matches!(
            format_prose("*x*")[0],
            Block::Paragraph { .. }
        ));
        assert!(matches!(
            format_prose("* x")[0],
            Block::List { ordered: false, .. }
        ));
    }

    #[test]
    fn test_newline_in_paragraph_is_line_break() {
        assert_eq!(
            format_prose("a\nb"),
            vec![para(vec![text("a"), InlineNode::LineBreak, text("b")])]
        );
    }

    #[test]
    fn test_blank_line_is_paragraph_break() {
        assert_eq!(
            format_prose("a\n\nb"),
            vec![para(vec![text("a")]), para(vec![text("b")])]
        );
    }

    #[test]
    fn test_extra_blank_lines_kept_as_breaks() {
        assert_eq!(
            format_prose("a\n\n\nb"),
            vec![
                para(vec![text("a")]),
                para(vec![InlineNode::LineBreak, text("b")]),
            ]
        );
    }

    #[test]
    fn test_trailing_newline_kept() {
        assert_eq!(
            format_prose("a\n"),
            vec![para(vec![text("a"), InlineNode::LineBreak])]
        );
    }

    #[test]
    fn test_heading_then_paragraph_order() {
        let blocks = format_prose("# Title\n\nSome *text*");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Heading { level: 1, .. }));
        assert_eq!(
            blocks[1],
            para(vec![
                text("Some "),
                InlineNode::Styled {
                    content: "text".to_string(),
                    style: StyleSet::italic(),
                },
            ])
        );
    }

    #[test]
    fn test_marker_line_ends_paragraph_without_blank() {
        let blocks = format_prose("intro\n# Title");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::Paragraph { .. }));
        assert!(matches!(&blocks[1], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn test_every_character_accounted_for() {
        let input = "pre **b** [l](u) post";
        let nodes = format_inline(input);
        let visible: String = nodes.iter().map(|n| n.visible_text()).collect();
        assert_eq!(visible, "pre b l post");
    }
}
