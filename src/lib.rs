/*!
 * # artran - AI article translator
 *
 * A Rust library for translating web articles with LLMs while keeping their
 * code blocks intact.
 *
 * ## Features
 *
 * - Fetch any web page as Markdown through a reader service
 * - Protect fenced code blocks behind `__CODE_BLOCK_<n>__` placeholders
 * - Translate the remaining prose using various AI providers:
 *   - OpenAI API (and OpenAI-compatible endpoints)
 *   - LM Studio (local server)
 *   - Anthropic API
 * - Restore the original code blocks verbatim after translation
 * - Report code blocks the model failed to preserve
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `markdown`: Markdown structure analysis:
 *   - `markdown::tokens`: Block token stream over pulldown-cmark
 *   - `markdown::line_table`: Line number to byte offset mapping
 *   - `markdown::fences`: Fenced code block location
 * - `protection`: Placeholder substitution and restoration
 * - `validation`: Placeholder survival checks
 * - `translation`: AI-powered translation service
 * - `providers`: Client implementations for the LLM providers
 * - `fetch`: Article fetching
 * - `session`: State carried between the fetch and translate actions
 * - `app_controller`: Main application controller
 * - `app_config`: Configuration management
 * - `file_utils`: File naming and writing
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod fetch;
pub mod file_utils;
pub mod language_utils;
pub mod markdown;
pub mod protection;
pub mod providers;
pub mod session;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{ConfigError, FetchError, ProviderError, TranslationError};
pub use protection::{protect_code_blocks, restore_code_blocks, PlaceholderMap, ProtectedDocument};
pub use session::TranslationSession;
pub use translation::{ArticleTranslator, TranslationService};
