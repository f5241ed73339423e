/*!
 * Misbehaving provider implementations for testing
 *
 * The in-crate `MockProvider` covers well-behaved and failing backends.
 * The providers here return output that a careless merge would corrupt:
 * quotes, fake placeholders and tags.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use yamler::errors::ProviderError;
use yamler::providers::Provider;

/// Returns hostile text for every request and records what it was sent
#[derive(Debug, Clone, Default)]
pub struct AdversarialProvider {
    seen: Arc<Mutex<Vec<String>>>,
}

impl AdversarialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts received, in order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl Provider for AdversarialProvider {
    async fn translate(&self, text: &str, _target_language: &str) -> Result<String, ProviderError> {
        self.seen.lock().push(text.to_string());
        Ok(format!("\"%evil%' <b>{}</b> &4'\"", text.to_uppercase()))
    }

    fn name(&self) -> &str {
        "adversarial"
    }
}

/// Upper-cases its input and counts calls
#[derive(Debug, Clone, Default)]
pub struct ShoutingProvider {
    calls: Arc<Mutex<usize>>,
}

impl ShoutingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl Provider for ShoutingProvider {
    async fn translate(&self, text: &str, _target_language: &str) -> Result<String, ProviderError> {
        *self.calls.lock() += 1;
        Ok(text.to_uppercase())
    }

    fn name(&self) -> &str {
        "shouting"
    }
}
