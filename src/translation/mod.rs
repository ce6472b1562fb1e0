/*!
 * Translation service for Markdown articles using AI providers.
 *
 * - `core`: the `ArticleTranslator` seam and the provider-backed `TranslationService`
 */

// Re-export main types for easier usage
pub use self::core::{render_system_prompt, ArticleTranslator, TranslationService};

// Submodules
pub mod core;
