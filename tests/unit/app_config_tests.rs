/*!
 * Tests for application configuration functionality
 */

use yamler::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};

use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.target_language, "ru");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.get_endpoint(), "https://translate.googleapis.com");
    assert_eq!(config.translation.get_timeout_secs(), 30);
    assert_eq!(config.translation.common.retry_count, 3);
    assert!(config.translation.common.cache_enabled);
    assert_eq!(config.session.page_size, 10);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();
    assert!(config.validate().is_ok());

    config.review.save_and_stop = "  ".to_string();
    assert!(config.validate().is_err());
    config.review.save_and_stop = "!stop".to_string();
    assert!(config.validate().is_ok());

    config.session.staging_suffix = String::new();
    assert!(config.validate().is_err());
    config.session.staging_suffix = ".partial".to_string();

    config.session.page_size = 0;
    assert!(config.validate().is_err());
}

/// Test that a config written to disk loads back with the same settings
#[test]
fn test_loadOrCreate_withCustomFile_shouldReadSettings() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "target_language": "de",
            "translation": {
                "provider": "ollama",
                "available_providers": [
                    { "type": "ollama", "model": "mistral", "endpoint": "http://gpu:11434", "timeout_secs": 90 }
                ],
                "common": { "cache_enabled": false }
            },
            "review": { "accept": "y", "keep_original": "k", "save_and_stop": "q" },
            "session": { "staging_suffix": ".part" },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    config.validate()?;

    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.get_model(), "mistral");
    assert_eq!(config.translation.get_endpoint(), "http://gpu:11434");
    assert_eq!(config.translation.get_timeout_secs(), 90);
    assert!(!config.translation.common.cache_enabled);
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.review.accept, "y");
    assert_eq!(config.session.staging_suffix, ".part");
    assert_eq!(config.session.page_size, 10);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a broken config file is reported instead of overwritten
#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    assert_eq!(common::read_file(&path), "{ not json");
    Ok(())
}

/// Test that overriding the model of a provider without an entry creates one
#[test]
fn test_activeProviderConfigMut_withMissingEntry_shouldCreateIt() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::Ollama;

    config.translation.active_provider_config_mut().model = "qwen2".to_string();

    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_model(), "qwen2");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
}

/// Test provider config defaults
#[test]
fn test_providerConfigNew_shouldUseProviderDefaults() {
    let anthropic = ProviderConfig::new(TranslationProvider::Anthropic);
    assert_eq!(anthropic.provider_type, "anthropic");
    assert_eq!(anthropic.endpoint, "https://api.anthropic.com");
    assert!(anthropic.api_key.is_empty());
}

/// Test log level mapping
#[test]
fn test_logLevel_toLevelFilter_shouldMap() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
