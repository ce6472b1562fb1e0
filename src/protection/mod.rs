/*!
 * Code block protection around translation.
 *
 * - `substitution`: swap fenced code blocks for placeholder tokens
 * - `restoration`: put the original blocks back after translation
 */

pub use self::restoration::{restore_code_blocks, restore_with_report, Restoration};
pub use self::substitution::{
    placeholder_for, protect_code_blocks, substitute_ranges, CodeRange, PlaceholderMap,
    ProtectedDocument,
};

pub mod restoration;
pub mod substitution;
