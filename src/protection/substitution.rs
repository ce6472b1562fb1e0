/*!
 * Placeholder substitution for fenced code blocks.
 *
 * Every fenced block is swapped for a `__CODE_BLOCK_<n>__` token so the prose
 * can go through a translation model without the code being touched. The
 * returned map holds the text needed to put each block back.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::markdown::{locate_fences, LineTable, LocatedFences};

/// Build the placeholder token for the `index`-th discovered block
pub fn placeholder_for(index: usize) -> String {
    format!("__CODE_BLOCK_{}__", index)
}

/// Placeholder token to original fenced block text, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block; placeholders are unique within one document
    pub fn insert(&mut self, placeholder: String, code: String) {
        debug_assert!(self.get(&placeholder).is_none(), "duplicate placeholder {}", placeholder);
        self.entries.push((placeholder, code));
    }

    /// Original block text for a placeholder
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == placeholder)
            .map(|(_, code)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(placeholder, code)` pairs in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, code)| (key.as_str(), code.as_str()))
    }

    /// Placeholders in discovery order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

/// A located block in absolute byte coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRange {
    pub start_offset: usize,
    pub end_offset: usize,
    pub placeholder: String,
}

/// Output of code block protection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedDocument {
    /// Document with every protected block replaced by its placeholder
    pub protected_text: String,
    /// Placeholder to original block text
    pub placeholder_map: PlaceholderMap,
    /// Fences the parser found but could not map to lines
    pub skipped_fences: usize,
}

/// Replace every fenced code block in `document` with a placeholder
pub fn protect_code_blocks(document: &str) -> ProtectedDocument {
    let lines = LineTable::new(document);
    let located = locate_fences(document, &lines);
    protect_located(document, &lines, located)
}

fn protect_located(document: &str, lines: &LineTable, located: LocatedFences) -> ProtectedDocument {
    if located.skipped > 0 {
        warn!("{} fenced code block(s) could not be mapped and stay unprotected", located.skipped);
    }

    if located.spans.is_empty() {
        return ProtectedDocument {
            protected_text: document.to_string(),
            placeholder_map: PlaceholderMap::new(),
            skipped_fences: located.skipped,
        };
    }

    let mut placeholder_map = PlaceholderMap::new();
    let mut ranges = Vec::with_capacity(located.spans.len());
    for (index, span) in located.spans.iter().enumerate() {
        let placeholder = placeholder_for(index);
        let (start_offset, end_offset) = lines.span_offsets(span.start_line, span.end_line);
        placeholder_map.insert(placeholder.clone(), span.reconstruct());
        ranges.push(CodeRange {
            start_offset,
            end_offset,
            placeholder,
        });
    }

    let protected_text = substitute_ranges(document, ranges);
    debug!(
        "Protected {} code block(s), {} -> {} bytes",
        placeholder_map.len(),
        document.len(),
        protected_text.len()
    );

    ProtectedDocument {
        protected_text,
        placeholder_map,
        skipped_fences: located.skipped,
    }
}

/// Copy `document`, swapping each range for its placeholder
///
/// Ranges are sorted by start offset first; they never overlap.
pub fn substitute_ranges(document: &str, mut ranges: Vec<CodeRange>) -> String {
    ranges.sort_by_key(|range| range.start_offset);

    let mut output = String::with_capacity(document.len());
    let mut cursor = 0;
    for range in ranges {
        output.push_str(&document[cursor..range.start_offset]);
        output.push_str(&range.placeholder);
        cursor = range.end_offset;
    }
    output.push_str(&document[cursor..]);
    output
}
