/*!
 * Reader and provider tests against a local canned HTTP server
 */

use artran::app_config::{Config, FetchConfig, TranslationProvider};
use artran::errors::{FetchError, ProviderError, TranslationError};
use artran::fetch::ContentFetcher;
use artran::protection::protect_code_blocks;
use artran::translation::{ArticleTranslator, TranslationService};
use artran::Controller;

use std::time::Duration;

use crate::common::{sample_article, serve_canned, serve_silent};

fn fetch_config(reader_base: String) -> FetchConfig {
    FetchConfig {
        reader_base,
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_fetchMarkdown_withOkResponse_shouldReturnBodyAndAppendUrlVerbatim() {
    let (base, received) = serve_canned("200 OK", "text/plain; charset=utf-8", sample_article()).await;
    let fetcher = ContentFetcher::new(&fetch_config(base));

    let markdown = fetcher.fetch_markdown("https://example.com/post").await.unwrap();

    assert_eq!(markdown, sample_article());
    let requests = received.lock().unwrap();
    assert!(requests[0].starts_with("GET /https://example.com/post HTTP/1.1"));
}

#[tokio::test]
async fn test_fetchMarkdown_withNotFound_shouldReturnStatusError() {
    let (base, _) = serve_canned("404 Not Found", "text/plain", "missing".to_string()).await;
    let fetcher = ContentFetcher::new(&fetch_config(base));

    let result = fetcher.fetch_markdown("https://example.com/gone").await;

    assert!(matches!(result, Err(FetchError::Status { status_code: 404 })));
}

#[tokio::test]
async fn test_fetchMarkdown_withSilentReader_shouldTimeOut() {
    let base = serve_silent().await;
    let fetcher = ContentFetcher::new(&FetchConfig {
        reader_base: base,
        timeout_secs: 1,
    });

    let result = tokio::time::timeout(Duration::from_secs(10), fetcher.fetch_markdown("https://example.com/slow"))
        .await
        .expect("configured timeout should fire first");

    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_openAITranslation_withSilentServer_shouldReturnConnectionError() {
    let base = serve_silent().await;

    let mut config = Config::default();
    let openai = config.translation.provider_config_mut(&TranslationProvider::OpenAI);
    openai.api_key = "sk-test".to_string();
    openai.endpoint = base;
    openai.timeout_secs = 1;
    let service = TranslationService::new(config.translation, "French").unwrap();

    let result = tokio::time::timeout(Duration::from_secs(10), service.translate("Hello"))
        .await
        .expect("configured timeout should fire first");

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::ConnectionError(_)))
    ));
}

#[tokio::test]
async fn test_fetchAndProtect_shouldBuildSessionFromReader() {
    let (base, _) = serve_canned("200 OK", "text/plain", sample_article()).await;
    let mut config = Config::default();
    config.fetch = fetch_config(base);
    let controller = Controller::with_config(config).unwrap();

    let session = controller.fetch_and_protect("https://example.com/blog/setup.html").await.unwrap();

    assert_eq!(session.original_markdown, sample_article());
    assert_eq!(session.protected_block_count(), 2);
    assert_eq!(session.base_filename(), "setup");
}

#[tokio::test]
async fn test_openAITranslation_shouldSendPromptAndReturnChoiceContent() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"Bonjour\n__CODE_BLOCK_0__"}}],"usage":{"prompt_tokens":12,"completion_tokens":4}}"#;
    let (base, received) = serve_canned("200 OK", "application/json", body.to_string()).await;

    let mut config = Config::default();
    let openai = config.translation.provider_config_mut(&TranslationProvider::OpenAI);
    openai.api_key = "sk-test".to_string();
    openai.endpoint = base;
    let service = TranslationService::new(config.translation, "French").unwrap();

    let protected = protect_code_blocks("Hello\n```\nx\n```\n");
    let translated = service.translate_article(&protected.protected_text, &protected.placeholder_map).await.unwrap();

    assert_eq!(translated, "Bonjour\n```\nx\n```\n");

    let request = received.lock().unwrap()[0].clone();
    assert!(request.starts_with("POST /chat/completions HTTP/1.1"));
    assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
    assert!(request.contains("\"model\":\"gpt-4o-mini\""));
    assert!(request.contains("French"));
    assert!(request.contains("Hello\\n__CODE_BLOCK_0__"));
    // The token limit is an Anthropic-only setting
    assert!(!request.contains("max_tokens"));
}

#[tokio::test]
async fn test_anthropicTranslation_shouldUseMessagesApi() {
    let body = r#"{"content":[{"type":"text","text":"Hallo Welt"}],"usage":{"input_tokens":9,"output_tokens":3}}"#;
    let (base, received) = serve_canned("200 OK", "application/json", body.to_string()).await;

    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    let anthropic = config.translation.provider_config_mut(&TranslationProvider::Anthropic);
    anthropic.api_key = "sk-ant".to_string();
    anthropic.endpoint = base;
    let service = TranslationService::new(config.translation, "German").unwrap();

    let translated = service.translate("Hello world").await.unwrap();

    assert_eq!(translated, "Hallo Welt");
    let request = received.lock().unwrap()[0].to_lowercase();
    assert!(request.starts_with("post /v1/messages http/1.1"));
    assert!(request.contains("x-api-key: sk-ant"));
    assert!(request.contains("anthropic-version: 2023-06-01"));
    assert!(request.contains("\"max_tokens\":4096"));
}

#[tokio::test]
async fn test_openAITranslation_withUnauthorized_shouldReturnAuthenticationError() {
    let (base, _) = serve_canned("401 Unauthorized", "application/json", r#"{"error":"bad key"}"#.to_string()).await;

    let mut config = Config::default();
    let openai = config.translation.provider_config_mut(&TranslationProvider::OpenAI);
    openai.api_key = "sk-wrong".to_string();
    openai.endpoint = base;
    let service = TranslationService::new(config.translation, "French").unwrap();

    let result = service.translate("Hello").await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::AuthenticationError(_)))
    ));
}

#[tokio::test]
async fn test_lmStudioTranslation_withServerError_shouldReturnApiError() {
    let (base, _) = serve_canned("500 Internal Server Error", "text/plain", "model not loaded".to_string()).await;

    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LMStudio;
    config.translation.provider_config_mut(&TranslationProvider::LMStudio).endpoint = base;
    let service = TranslationService::new(config.translation, "Spanish").unwrap();

    let result = service.translate("Hello").await;

    match result {
        Err(TranslationError::Provider(ProviderError::ApiError { status_code, message })) => {
            assert_eq!(status_code, 500);
            assert!(message.contains("model not loaded"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}
