/*!
 * Fenced code block location.
 *
 * Filters the block token stream down to fenced code blocks that can be
 * mapped back to source lines. Fences the parser could not map are skipped
 * rather than failing the whole document.
 */

use log::debug;

use super::line_table::LineTable;
use super::tokens::{tokenize, MarkdownToken};

/// One fenced code block located in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSpan {
    /// First line of the block (the opening fence)
    pub start_line: usize,
    /// One past the last line of the block (the closing fence)
    pub end_line: usize,
    /// Opening fence run, reused as the closing fence on reconstruction
    pub fence_marker: String,
    /// Info string, empty when the fence has none
    pub language_tag: String,
    /// Code between the fences
    pub raw_content: String,
}

impl FenceSpan {
    /// Rebuild the conventional fenced block text for this span
    ///
    /// `marker[ tag]\ncontent marker\n`: the content already ends with a
    /// newline for every code line it holds.
    pub fn reconstruct(&self) -> String {
        let mut block = String::with_capacity(
            self.fence_marker.len() * 2 + self.language_tag.len() + self.raw_content.len() + 3,
        );
        block.push_str(&self.fence_marker);
        if !self.language_tag.is_empty() {
            block.push(' ');
            block.push_str(&self.language_tag);
        }
        block.push('\n');
        block.push_str(&self.raw_content);
        block.push_str(&self.fence_marker);
        block.push('\n');
        block
    }
}

/// Result of scanning a document for fenced code blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedFences {
    /// Resolvable fences, in the order the parser reported them
    pub spans: Vec<FenceSpan>,
    /// Number of fences dropped because they had no line mapping
    pub skipped: usize,
}

/// Locate every fenced code block in `document`
pub fn locate_fences(document: &str, lines: &LineTable) -> LocatedFences {
    if document.is_empty() {
        return LocatedFences::default();
    }
    collect_fences(tokenize(document, lines))
}

/// Keep the fence tokens of a token stream, counting those without a line map
pub(crate) fn collect_fences<I>(tokens: I) -> LocatedFences
where
    I: IntoIterator<Item = MarkdownToken>,
{
    let mut located = LocatedFences::default();
    for token in tokens {
        let MarkdownToken::Fence(fence) = token else {
            continue;
        };
        match fence.map {
            Some((start_line, end_line)) => located.spans.push(FenceSpan {
                start_line,
                end_line,
                fence_marker: fence.markup,
                language_tag: fence.info,
                raw_content: fence.content,
            }),
            None => {
                debug!("Skipping fenced block without a line mapping ({} marker)", fence.markup);
                located.skipped += 1;
            }
        }
    }

    located
}
