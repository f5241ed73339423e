use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, status_error, transport_error, translate_trimmed, with_retries};

/// Client for the public Google web translation endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for making requests
    client: Client,
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
    /// Source language code or `auto`
    source_language: String,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            source_language: source_language.into(),
            max_retries,
            backoff_base_ms,
        }
    }

    /// Build the request URL for one piece of text
    pub fn request_url(&self, text: &str, target_language: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        Url::parse_with_params(
            &base,
            &[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", base, e)))
    }

    /// Extract the translated text from the endpoint's nested-array response.
    ///
    /// The answer looks like `[[["Привет","Hello",...], ...], null, "en", ...]`;
    /// long inputs come back as several sentence chunks that must be joined.
    pub fn extract_text(body: &Value) -> Result<String, ProviderError> {
        let sentences = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing sentence array".to_string()))?;

        let text: String = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .collect();

        if text.is_empty() {
            return Err(ProviderError::ParseError("response contained no text".to_string()));
        }
        Ok(text)
    }

    async fn request(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        let url = self.request_url(text, target_language)?;

        let response = self.client.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(status_error(status, body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_text(&body)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        translate_trimmed(text, |core| async move {
            debug!("Google: translating {} chars to {}", core.chars().count(), target_language);
            with_retries("Google", self.max_retries, self.backoff_base_ms, || {
                self.request(&core, target_language)
            })
            .await
        })
        .await
    }

    fn name(&self) -> &str {
        "google"
    }
}
