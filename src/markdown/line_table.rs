/*!
 * Line-to-offset mapping for Markdown documents.
 *
 * The parser reports block extents as byte ranges; the protection pipeline
 * works in whole lines. `LineTable` bridges the two with a cumulative offset
 * table built once per document.
 */

use std::ops::Range;

/// Cumulative byte offsets of every line start in a document
///
/// `offsets[0] == 0`, `offsets[i + 1] - offsets[i]` is the length of line `i`
/// including its terminator, and the table holds `line_count() + 1` entries so
/// an exclusive end line can point one past the last line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    offsets: Vec<usize>,
}

impl LineTable {
    /// Build the table for a document
    ///
    /// Lines split after each `'\n'`; a `"\r\n"` terminator stays with its line
    /// and a trailing unterminated line still counts as a line.
    pub fn new(document: &str) -> Self {
        let mut offsets = Vec::with_capacity(document.len() / 32 + 2);
        offsets.push(0);
        for line in document.split_inclusive('\n') {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + line.len());
        }
        Self { offsets }
    }

    /// Number of lines in the document
    pub fn line_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total length of the document in bytes
    pub fn document_len(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    /// Raw offset table
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Byte offset at which `line` starts
    ///
    /// # Panics
    /// If `line > line_count()`. Line numbers come from the parser, so an
    /// out-of-range index means the table and the parse disagree about the
    /// document.
    pub fn offset_of_line(&self, line: usize) -> usize {
        match self.offsets.get(line) {
            Some(offset) => *offset,
            None => panic!(
                "line index {} out of bounds for line table with {} lines",
                line,
                self.line_count()
            ),
        }
    }

    /// Translate a `[start_line, end_line)` span into `(start_offset, end_offset)`
    ///
    /// # Panics
    /// Same invariant as [`LineTable::offset_of_line`].
    pub fn span_offsets(&self, start_line: usize, end_line: usize) -> (usize, usize) {
        (self.offset_of_line(start_line), self.offset_of_line(end_line))
    }

    /// Line containing the byte at `offset`, if the offset lies inside the document
    pub fn line_of_offset(&self, offset: usize) -> Option<usize> {
        if offset >= self.document_len() {
            return None;
        }
        // First entry strictly greater than `offset`, minus one, is the owning line
        Some(self.offsets.partition_point(|&start| start <= offset) - 1)
    }

    /// Map a parser byte range to an exclusive `(start_line, end_line)` pair
    ///
    /// Returns `None` for an empty range or one that reaches past the document;
    /// callers treat that as an unresolvable block.
    pub fn line_range_of(&self, range: &Range<usize>) -> Option<(usize, usize)> {
        if range.start >= range.end {
            return None;
        }
        let start_line = self.line_of_offset(range.start)?;
        let last_line = self.line_of_offset(range.end - 1)?;
        Some((start_line, last_line + 1))
    }
}
