/*!
 * Block-level token stream for Markdown documents.
 *
 * `pulldown-cmark` reports a flat event stream with byte ranges. This module
 * folds it into a closed set of block tokens, each carrying the line span the
 * block occupies in the source (when it can be resolved).
 */

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::ops::Range;

use super::line_table::LineTable;

/// Exclusive `(start_line, end_line)` span, or `None` when the block could not
/// be mapped back to source lines
pub type LineMap = Option<(usize, usize)>;

/// A fenced code block as reported by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceToken {
    /// Source lines covered by the block, fences included
    pub map: LineMap,
    /// Opening fence run, e.g. "```" or "~~~~"
    pub markup: String,
    /// Info string after the opening fence, trimmed
    pub info: String,
    /// Code between the fences, one trailing newline per line
    pub content: String,
}

/// Block-level Markdown token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownToken {
    Fence(FenceToken),
    IndentedCode { map: LineMap },
    Heading { level: u8, map: LineMap },
    Paragraph { map: LineMap },
    BlockQuote { map: LineMap },
    List { ordered: bool, map: LineMap },
    Html { map: LineMap },
    Rule { map: LineMap },
    Table { map: LineMap },
}

impl MarkdownToken {
    /// Line span of the token, whatever its kind
    pub fn map(&self) -> LineMap {
        match self {
            Self::Fence(fence) => fence.map,
            Self::IndentedCode { map }
            | Self::Heading { map, .. }
            | Self::Paragraph { map }
            | Self::BlockQuote { map }
            | Self::List { map, .. }
            | Self::Html { map }
            | Self::Rule { map }
            | Self::Table { map } => *map,
        }
    }
}

/// Code block being collected between its start and end events
struct PendingCode {
    fenced: Option<(String, String)>,
    map: LineMap,
    content: String,
}

/// Parse a document into its block tokens, in document order
///
/// Container blocks are emitted before the blocks they contain, so a fence
/// inside a block quote follows the `BlockQuote` token.
pub fn tokenize(document: &str, lines: &LineTable) -> Vec<MarkdownToken> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(document, options).into_offset_iter();

    let mut tokens = Vec::new();
    let mut pending: Option<PendingCode> = None;

    for (event, range) in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let fenced = match kind {
                    CodeBlockKind::Fenced(info) => Some((
                        fence_markup(document, &range),
                        info.trim().to_string(),
                    )),
                    CodeBlockKind::Indented => None,
                };
                pending = Some(PendingCode {
                    fenced,
                    map: lines.line_range_of(&range),
                    content: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(code) = pending.as_mut() {
                    code.content.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = pending.take() {
                    tokens.push(match code.fenced {
                        Some((markup, info)) => MarkdownToken::Fence(FenceToken {
                            map: code.map,
                            markup,
                            info,
                            content: code.content,
                        }),
                        None => MarkdownToken::IndentedCode { map: code.map },
                    });
                }
            }
            Event::Start(Tag::Heading { level, .. }) => {
                tokens.push(MarkdownToken::Heading {
                    level: heading_level(level),
                    map: lines.line_range_of(&range),
                });
            }
            Event::Start(Tag::Paragraph) => {
                tokens.push(MarkdownToken::Paragraph { map: lines.line_range_of(&range) });
            }
            Event::Start(Tag::BlockQuote(_)) => {
                tokens.push(MarkdownToken::BlockQuote { map: lines.line_range_of(&range) });
            }
            Event::Start(Tag::List(first_item)) => {
                tokens.push(MarkdownToken::List {
                    ordered: first_item.is_some(),
                    map: lines.line_range_of(&range),
                });
            }
            Event::Start(Tag::HtmlBlock) => {
                tokens.push(MarkdownToken::Html { map: lines.line_range_of(&range) });
            }
            Event::Start(Tag::Table(_)) => {
                tokens.push(MarkdownToken::Table { map: lines.line_range_of(&range) });
            }
            Event::Rule => {
                tokens.push(MarkdownToken::Rule { map: lines.line_range_of(&range) });
            }
            _ => {}
        }
    }

    tokens
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Read the opening fence run from the first line of a fenced block
///
/// The block range may start before the fence when the block sits in a
/// container, so skip ahead to the first backtick or tilde on that line.
fn fence_markup(document: &str, range: &Range<usize>) -> String {
    let first_line = document
        .get(range.start..range.end)
        .and_then(|block| block.split('\n').next())
        .unwrap_or("");

    match first_line.find(['`', '~']) {
        Some(pos) => {
            let rest = &first_line[pos..];
            let fence_char = if rest.starts_with('~') { '~' } else { '`' };
            let run = rest.len() - rest.trim_start_matches(fence_char).len();
            rest[..run].to_string()
        }
        None => "```".to_string(),
    }
}
