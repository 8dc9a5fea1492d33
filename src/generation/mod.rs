//! Text generation capability.
//!
//! The translator treats generation as an opaque `prompt -> text` call behind the
//! [`GenerationProvider`] trait. The shipped implementation talks to an
//! OpenAI-compatible chat completions endpoint.

pub mod openai;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::GenerationConfig;

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Optional system message placed before the prompt.
    pub system: Option<String>,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for text completion backends.
///
/// Failures are opaque to the caller; no retries are attempted here.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Check the shape of an API key before any request is made.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    anyhow::ensure!(!api_key.is_empty(), "API key is required");
    anyhow::ensure!(
        api_key.starts_with("sk-") || api_key.starts_with("test-"),
        "invalid API key format"
    );
    Ok(())
}

/// Create a generation provider from config.
///
/// Currently only `"openai"` is supported.
pub fn create_provider(config: &GenerationConfig) -> Result<Box<dyn GenerationProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(openai::OpenAiProvider::new(config)?)),
        other => anyhow::bail!("unknown generation provider: {other}. Supported: openai"),
    }
}
