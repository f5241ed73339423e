/*!
 * Tests for provider construction from configuration
 */

use yamler::app_config::{Config, TranslationProvider};
use yamler::providers::Provider;
use yamler::providers::build_provider;
use yamler::providers::mock::MockProvider;

/// Test that each configured provider type builds the matching backend
#[test]
fn test_buildProvider_withEachType_shouldReturnNamedProvider() {
    let mut config = Config::default();

    for (provider, name) in [
        (TranslationProvider::Google, "google"),
        (TranslationProvider::Ollama, "ollama"),
        (TranslationProvider::Mock, "mock"),
    ] {
        config.translation.provider = provider;
        let built = build_provider(&config).unwrap();
        assert_eq!(built.name(), name);
    }
}

/// Test that Anthropic needs a key
#[test]
fn test_buildProvider_withAnthropic_shouldRequireKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(build_provider(&config).is_err());

    config.translation.active_provider_config_mut().api_key = "sk-test".to_string();
    let built = build_provider(&config).unwrap();
    assert_eq!(built.name(), "anthropic");
}

/// Test that an unknown target language fails while rendering the LLM prompt
#[test]
fn test_buildProvider_withUnknownTargetLanguage_shouldFailForLlm() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.target_language = "zz".to_string();
    assert!(build_provider(&config).is_err());
}

/// Test the mock provider's intermittent failures
#[tokio::test]
async fn test_mockProvider_intermittent_shouldFailEveryNthRequest() {
    let provider = MockProvider::intermittent(2);

    assert!(provider.translate("a", "ru").await.is_ok());
    assert!(provider.translate("b", "ru").await.is_err());
    assert!(provider.translate("c", "ru").await.is_ok());
    assert_eq!(provider.request_count(), 3);
}
