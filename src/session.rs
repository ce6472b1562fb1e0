/*!
 * Request-scoped state carried between the fetch and translate actions.
 *
 * The protection core never touches this type; it only consumes and returns
 * plain values. The controller owns the session for the life of one article.
 */

use serde::{Deserialize, Serialize};

use crate::file_utils::{derive_base_filename, DEFAULT_BASE_FILENAME};
use crate::protection::{protect_code_blocks, PlaceholderMap, Restoration};

/// Everything known about one article being translated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationSession {
    /// URL the article came from, if any
    pub source_url: Option<String>,
    /// Markdown as fetched
    pub original_markdown: String,
    /// Markdown with code blocks swapped for placeholders
    pub protected_markdown: String,
    /// Placeholder to original code block
    pub placeholder_map: PlaceholderMap,
    /// Fences that could not be protected
    pub skipped_fences: usize,
    /// Final translated Markdown with code restored
    pub translated_markdown: Option<String>,
    /// Placeholders the translation did not preserve
    pub missing_placeholders: Vec<String>,
}

impl TranslationSession {
    /// Start a session by protecting freshly fetched Markdown
    pub fn protect(source_url: Option<String>, original_markdown: String) -> Self {
        let protected = protect_code_blocks(&original_markdown);
        Self {
            source_url,
            original_markdown,
            protected_markdown: protected.protected_text,
            placeholder_map: protected.placeholder_map,
            skipped_fences: protected.skipped_fences,
            translated_markdown: None,
            missing_placeholders: Vec::new(),
        }
    }

    /// Number of code blocks held back from translation
    pub fn protected_block_count(&self) -> usize {
        self.placeholder_map.len()
    }

    /// Store the restored translation
    pub fn record_translation(&mut self, restoration: Restoration) {
        self.translated_markdown = Some(restoration.text);
        self.missing_placeholders = restoration.missing;
    }

    /// Whether both documents are available to save
    pub fn is_ready_for_download(&self) -> bool {
        !self.original_markdown.is_empty()
            && self.translated_markdown.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Base name for the download files
    pub fn base_filename(&self) -> String {
        match self.source_url.as_deref() {
            Some(url) if !url.is_empty() => derive_base_filename(url),
            _ => DEFAULT_BASE_FILENAME.to_string(),
        }
    }
}
