/*!
 * Tests for application configuration functionality
 */

use std::collections::HashMap;

use artran::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use artran::errors::ConfigError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "zh");
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.fetch.reader_base, "https://r.jina.ai/");
    assert_eq!(config.fetch.timeout_secs, 20);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.translation.common.system_prompt.contains("{target_language}"));
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "target_language": "de",
        "translation": {
            "provider": "anthropic",
            "available_providers": [
                { "type": "anthropic", "model": "claude-3-5-sonnet-latest", "api_key": "sk-ant" }
            ]
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(config.translation.get_model(), "claude-3-5-sonnet-latest");
    assert_eq!(config.translation.get_api_key(), "sk-ant");
    // Endpoint left empty falls back to the provider default
    assert_eq!(config.translation.get_endpoint(), "https://api.anthropic.com");
    assert_eq!(config.translation.get_timeout_secs(), 120);
    assert_eq!(config.fetch.timeout_secs, 20);
}

#[test]
fn test_config_validation_withMissingOpenAIKey_shouldReturnMissingApiKey() {
    let config = Config::default();
    let result = config.validate();
    assert!(matches!(result, Err(ConfigError::MissingApiKey { ref provider }) if provider == "OpenAI"));
}

#[test]
fn test_config_validation_withWhitespaceKey_shouldStillFail() {
    let mut config = Config::default();
    config.translation.provider_config_mut(&TranslationProvider::OpenAI).api_key = "   ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withLMStudio_shouldNotNeedKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LMStudio;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withUnknownLanguage_shouldReturnInvalidLanguage() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LMStudio;
    config.target_language = "klingon".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidLanguage(_))));
}

#[test]
fn test_applyOverrides_withOpenAIVariables_shouldOverrideFileValues() {
    let mut config = Config::default();
    config.apply_overrides_from(lookup_from(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", "https://llm.internal/v1"),
        ("OPENAI_MODEL", "gpt-4o"),
    ]));

    assert_eq!(config.translation.get_api_key(), "sk-test");
    assert_eq!(config.translation.get_endpoint(), "https://llm.internal/v1");
    assert_eq!(config.translation.get_model(), "gpt-4o");
    assert!(config.validate().is_ok());
}

#[test]
fn test_applyOverrides_withEmptyValue_shouldKeepExisting() {
    let mut config = Config::default();
    config.translation.provider_config_mut(&TranslationProvider::OpenAI).api_key = "from-file".to_string();
    config.apply_overrides_from(lookup_from(&[("OPENAI_API_KEY", "")]));
    assert_eq!(config.translation.get_api_key(), "from-file");
}

#[test]
fn test_applyOverrides_withAnthropicVariables_shouldCreateMissingProviderEntry() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.apply_overrides_from(lookup_from(&[
        ("ANTHROPIC_API_KEY", "sk-ant"),
        ("ANTHROPIC_MODEL", "claude-3-5-haiku-latest"),
    ]));

    let anthropic = config
        .translation
        .get_provider_config(&TranslationProvider::Anthropic)
        .expect("Anthropic entry should be created");
    assert_eq!(anthropic.api_key, "sk-ant");
    assert_eq!(anthropic.model, "claude-3-5-haiku-latest");
}

#[test]
fn test_translationProvider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("OpenAI".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert_eq!("lmstudio".parse::<TranslationProvider>().unwrap(), TranslationProvider::LMStudio);
    assert!("ollama".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Anthropic.to_string(), "anthropic");
}

#[test]
fn test_providerConfig_new_shouldUseProviderDefaults() {
    let lmstudio = ProviderConfig::new(TranslationProvider::LMStudio);
    assert_eq!(lmstudio.provider_type, "lmstudio");
    assert_eq!(lmstudio.endpoint, "http://localhost:1234/v1");
    assert!(lmstudio.api_key.is_empty());
}

#[test]
fn test_targetLanguageName_shouldResolveIsoCode() {
    let config = Config::default();
    assert_eq!(config.target_language_name().unwrap(), "Chinese");
}

#[test]
fn test_config_serializeRoundTrip_shouldKeepProviderType() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    assert!(json.contains("\"type\": \"openai\""));
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.translation.available_providers.len(), config.translation.available_providers.len());
}
