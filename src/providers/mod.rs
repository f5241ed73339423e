/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Google: the public web translation endpoint (no key required)
 * - Ollama: Local LLM server
 * - Anthropic: Anthropic API integration
 * - Mock: deterministic in-process provider for tests and dry runs
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::app_config::{Config, TranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils;

pub mod anthropic;
pub mod google;
pub mod mock;
pub mod ollama;

/// Common trait for all translation backends
///
/// The session only ever needs one operation: turn a piece of text into
/// its translation. Implementations may fail; callers fall back to the
/// original text.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate `text` into `target_language` (ISO code)
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Build the provider selected in the configuration
pub fn build_provider(config: &Config) -> Result<Box<dyn Provider>> {
    let translation = &config.translation;
    let common = &translation.common;
    let timeout = Duration::from_secs(translation.get_timeout_secs());

    let provider: Box<dyn Provider> = match translation.provider {
        TranslationProvider::Google => Box::new(google::GoogleTranslate::new(
            translation.get_endpoint(),
            &config.source_language,
            timeout,
            common.retry_count,
            common.retry_backoff_ms,
        )),
        TranslationProvider::Ollama => Box::new(ollama::Ollama::new(
            translation.get_endpoint(),
            translation.get_model(),
            render_system_prompt(config)?,
            common.temperature,
            timeout,
            common.retry_count,
            common.retry_backoff_ms,
        )),
        TranslationProvider::Anthropic => {
            let api_key = translation.get_api_key();
            if api_key.is_empty() {
                return Err(anyhow!("Translation API key is required for Anthropic provider"));
            }
            Box::new(anthropic::Anthropic::new(
                api_key,
                translation.get_endpoint(),
                translation.get_model(),
                render_system_prompt(config)?,
                common.temperature,
                timeout,
                common.retry_count,
                common.retry_backoff_ms,
            ))
        }
        TranslationProvider::Mock => Box::new(mock::MockProvider::working()),
    };

    debug!("Using {} provider", provider.name());
    Ok(provider)
}

/// Fill `{source_language}` and `{target_language}` in the configured system prompt
fn render_system_prompt(config: &Config) -> Result<String> {
    let source = if config.source_language.eq_ignore_ascii_case("auto") {
        "the detected source language".to_string()
    } else {
        language_utils::get_language_name(&config.source_language)?
    };
    let target = language_utils::get_language_name(&config.target_language)?;

    Ok(config
        .translation
        .common
        .system_prompt
        .replace("{source_language}", &source)
        .replace("{target_language}", &target))
}

/// Split `text` into leading whitespace, core, trailing whitespace
pub(crate) fn split_outer_whitespace(text: &str) -> (&str, &str, &str) {
    let core_start = text.len() - text.trim_start().len();
    let core_end = text.trim_end().len().max(core_start);
    (&text[..core_start], &text[core_start..core_end], &text[core_end..])
}

/// Backends trim their answers; restore the whitespace the segment came with.
/// Whitespace-only input never reaches the backend.
pub(crate) async fn translate_trimmed<F, Fut>(text: &str, call: F) -> Result<String, ProviderError>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String, ProviderError>>,
{
    let (leading, core, trailing) = split_outer_whitespace(text);
    if core.is_empty() {
        return Ok(text.to_string());
    }

    let translated = call(core.to_string()).await?;
    Ok(format!("{}{}{}", leading, translated.trim(), trailing))
}

/// Whether a failed request is worth another attempt
fn is_retryable(error: &ProviderError) -> bool {
    match error {
        ProviderError::RequestFailed(_)
        | ProviderError::ConnectionError(_)
        | ProviderError::RateLimitExceeded(_) => true,
        ProviderError::ApiError { status_code, .. } => *status_code >= 500,
        ProviderError::ParseError(_) | ProviderError::AuthenticationError(_) => false,
    }
}

/// Run `op` with exponential backoff; the delay doubles after each failed attempt
pub(crate) async fn with_retries<T, F, Fut>(
    label: &str,
    max_retries: u32,
    backoff_base_ms: u64,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries && is_retryable(&e) => {
                let delay = backoff_base_ms.saturating_mul(1 << attempt.min(16));
                warn!(
                    "{} request failed (attempt {}/{}): {}. Retrying in {}ms",
                    label,
                    attempt + 1,
                    max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(body),
        429 => ProviderError::RateLimitExceeded(body),
        code => ProviderError::ApiError { status_code: code, message: body },
    }
}

/// Map a transport-level reqwest error to a provider error
pub(crate) fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}
