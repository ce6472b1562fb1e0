/*!
 * Markdown structure analysis.
 *
 * - `line_table`: line number to byte offset mapping
 * - `tokens`: block-level token stream over `pulldown-cmark`
 * - `fences`: fenced code block location
 */

pub use self::fences::{locate_fences, FenceSpan, LocatedFences};
pub use self::line_table::LineTable;
pub use self::tokens::{tokenize, FenceToken, LineMap, MarkdownToken};

pub mod fences;
pub mod line_table;
pub mod tokens;
