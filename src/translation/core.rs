/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which sends protected Markdown to the configured provider and hands back the
 * translated text.
 */

use async_trait::async_trait;
use log::{debug, info};
use std::time::Instant;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::protection::{restore_code_blocks, PlaceholderMap};
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;

/// Anything that can translate protected Markdown
///
/// The input carries `__CODE_BLOCK_<n>__` placeholders which implementations
/// are expected to pass through untouched; nothing here checks that they do.
#[async_trait]
pub trait ArticleTranslator: Send + Sync {
    /// Translate protected Markdown into the target language
    async fn translate(&self, protected_markdown: &str) -> Result<String, TranslationError>;
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// LM Studio local server (OpenAI-compatible)
    LMStudio {
        /// Client instance (OpenAI-compatible)
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },
}

/// Main translation service for article translation
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// System prompt with the target language filled in
    system_prompt: String,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    ///
    /// Fails with a configuration error, before any request is made, when the
    /// provider needs an API key and none is configured.
    pub fn new(config: TranslationConfig, target_language_name: &str) -> Result<Self, TranslationError> {
        config.ensure_credentials()?;

        let timeout_secs = config.get_timeout_secs();
        let provider = match config.provider {
            ConfigTranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new(config.get_api_key(), config.get_endpoint(), timeout_secs),
            },
            ConfigTranslationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };

                TranslationProviderImpl::LMStudio {
                    client: OpenAI::new(api_key, config.get_endpoint(), timeout_secs),
                }
            }
            ConfigTranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(config.get_api_key(), config.get_endpoint(), timeout_secs),
            },
        };

        let system_prompt = render_system_prompt(&config.common.system_prompt, target_language_name);

        Ok(Self {
            provider,
            config,
            system_prompt,
        })
    }

    /// System prompt sent with every request
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Translate protected Markdown, then put the code blocks back
    pub async fn translate_article(
        &self,
        protected_markdown: &str,
        placeholder_map: &PlaceholderMap,
    ) -> Result<String, TranslationError> {
        let translated = self.translate(protected_markdown).await?;
        Ok(restore_code_blocks(&translated, placeholder_map))
    }

    async fn translate_openai(&self, client: &OpenAI, text: &str) -> Result<String, TranslationError> {
        let mut request = OpenAIRequest::new(self.config.get_model())
            .add_message("system", &self.system_prompt)
            .add_message("user", text);
        if let Some(temperature) = self.config.common.temperature {
            request = request.temperature(temperature);
        }

        let response = client.complete(request).await?;
        if let Some(usage) = response.usage.as_ref() {
            debug!("Token usage: prompt={}, completion={}", usage.prompt_tokens, usage.completion_tokens);
        }
        Ok(OpenAI::extract_text(&response))
    }

    async fn translate_anthropic(&self, client: &Anthropic, text: &str) -> Result<String, TranslationError> {
        let mut request = AnthropicRequest::new(self.config.get_model(), self.config.common.max_tokens)
            .system(&self.system_prompt)
            .add_message("user", text);
        if let Some(temperature) = self.config.common.temperature {
            request = request.temperature(temperature);
        }

        let response = client.complete(request).await?;
        debug!(
            "Token usage: prompt={}, completion={}",
            response.usage.input_tokens, response.usage.output_tokens
        );
        Ok(Anthropic::extract_text(&response))
    }
}

#[async_trait]
impl ArticleTranslator for TranslationService {
    async fn translate(&self, protected_markdown: &str) -> Result<String, TranslationError> {
        let start_time = Instant::now();
        info!(
            "Translating {} chars with {} ({})",
            protected_markdown.chars().count(),
            self.config.provider.display_name(),
            self.config.get_model()
        );

        let translated = match &self.provider {
            TranslationProviderImpl::OpenAI { client } | TranslationProviderImpl::LMStudio { client } => {
                self.translate_openai(client, protected_markdown).await?
            }
            TranslationProviderImpl::Anthropic { client } => {
                self.translate_anthropic(client, protected_markdown).await?
            }
        };

        debug!("Translation response received in {:?}", start_time.elapsed());
        Ok(translated)
    }
}

/// Fill `{target_language}` in a system prompt template
pub fn render_system_prompt(template: &str, target_language_name: &str) -> String {
    template.replace("{target_language}", target_language_name)
}
