/*!
 * Validation of translated articles.
 *
 * - `placeholders`: checks that code block placeholders survived translation
 */

pub mod placeholders;

// Re-export main types
pub use placeholders::{PlaceholderValidationResult, PlaceholderValidator};
