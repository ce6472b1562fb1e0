use anyhow::{Result, Context, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, debug};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::fetch::ContentFetcher;
use crate::file_utils::FileManager;
use crate::protection::restore_with_report;
use crate::session::TranslationSession;
use crate::translation::{ArticleTranslator, TranslationService};
use crate::validation::PlaceholderValidator;

// @module: Application controller for article translation

/// Main application controller for article translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Reader client
    fetcher: ContentFetcher,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let fetcher = ContentFetcher::new(&config.fetch);
        Ok(Self { config, fetcher })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch an article and protect its code blocks
    pub async fn fetch_and_protect(&self, url: &str) -> Result<TranslationSession> {
        let spinner = Self::spinner("Fetching and preprocessing Markdown");
        let fetched = self.fetcher.fetch_markdown(url).await;
        spinner.finish_and_clear();

        let markdown = fetched.with_context(|| format!("Failed to fetch article: {}", url))?;
        let session = TranslationSession::protect(Some(url.to_string()), markdown);
        self.log_protection(&session);
        Ok(session)
    }

    /// Protect a local Markdown file instead of fetching
    pub fn protect_file(&self, path: &Path, source_url: Option<String>) -> Result<TranslationSession> {
        let markdown = FileManager::read_to_string(path)?;
        let session = TranslationSession::protect(source_url, markdown);
        self.log_protection(&session);
        Ok(session)
    }

    /// Build the provider-backed translator for the configured target language
    pub fn translator(&self) -> Result<TranslationService> {
        let language_name = self.config.target_language_name()?;
        Ok(TranslationService::new(self.config.translation.clone(), &language_name)?)
    }

    /// Translate a protected session and restore its code blocks
    ///
    /// Lost placeholders are logged; with `strict` they fail the action instead.
    pub async fn translate_session<T>(
        &self,
        session: &mut TranslationSession,
        translator: &T,
        strict: bool,
    ) -> Result<()>
    where
        T: ArticleTranslator + ?Sized,
    {
        if session.protected_markdown.is_empty() {
            return Err(anyhow!("Nothing to translate: fetch an article first"));
        }

        let start_time = std::time::Instant::now();
        let spinner = Self::spinner("Requesting LLM translation");
        let translated = translator.translate(&session.protected_markdown).await;
        spinner.finish_and_clear();
        let translated = translated.context("Translation request failed")?;

        let validation = PlaceholderValidator::validate(&translated, &session.placeholder_map);
        if validation.out_of_order {
            debug!("Placeholders came back reordered: {:?}", validation.found_indices);
        }
        if !validation.unexpected_indices.is_empty() {
            warn!("Translation contains unknown placeholders: {:?}", validation.unexpected_indices);
        }
        if !validation.duplicated_indices.is_empty() {
            warn!("Code block placeholders repeated in translation: {:?}", validation.duplicated_indices);
        }
        if strict && !validation.missing_indices.is_empty() {
            return Err(TranslationError::PlaceholdersLost {
                missing: validation.missing_placeholders(),
            }.into());
        }

        let restoration = restore_with_report(&translated, &session.placeholder_map);
        session.record_translation(restoration);

        info!(
            "Translation completed in {}.",
            Self::format_duration(start_time.elapsed())
        );
        Ok(())
    }

    /// Write `<base>_original.md` and `<base>_translated.md` into `output_dir`
    pub fn save_downloads(&self, session: &TranslationSession, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let translated = match session.translated_markdown.as_deref() {
            Some(text) if session.is_ready_for_download() => text,
            _ => return Err(anyhow!("No translated article to save")),
        };

        FileManager::ensure_dir(output_dir)?;
        let (original_path, translated_path) = FileManager::download_paths(output_dir, &session.base_filename());
        FileManager::write_to_file(&original_path, &session.original_markdown)?;
        FileManager::write_to_file(&translated_path, translated)?;

        info!("Saved {:?} and {:?}", original_path, translated_path);
        Ok((original_path, translated_path))
    }

    fn log_protection(&self, session: &TranslationSession) {
        info!(
            "Protected {} code block(s) in {} chars of Markdown",
            session.protected_block_count(),
            session.original_markdown.chars().count()
        );
        if session.skipped_fences > 0 {
            warn!("{} code block(s) could not be protected", session.skipped_fences);
        }
    }

    fn spinner(message: &'static str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Format a duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let millis = duration.subsec_millis();

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, millis)
        }
    }
}
