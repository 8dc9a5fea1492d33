//! OpenAI-compatible chat completions client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{validate_api_key, CompletionRequest, GenerationProvider};
use crate::config::GenerationConfig;

pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        validate_api_key(&config.api_key)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });
        ChatRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request(request);

        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            prompt_len = request.prompt.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("HTTP request failed for {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("completion request failed with HTTP {status}: {text}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse completion response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("completion response had no message content")
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> GenerationConfig {
        GenerationConfig {
            base_url: base_url.to_string(),
            api_key: "sk-test".into(),
            model: "gpt-4".into(),
            ..GenerationConfig::default()
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: Some("Jesteś korpotłumaczem".into()),
            prompt: "Przetłumacz".into(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    #[test]
    fn rejects_bad_api_key() {
        let mut cfg = config("http://localhost");
        cfg.api_key = "nope".into();
        assert!(OpenAiProvider::new(&cfg).is_err());
    }

    #[test]
    fn request_body_has_system_then_user() {
        let provider = OpenAiProvider::new(&config("http://localhost/")).unwrap();
        let req = request();
        let body = serde_json::to_value(provider.build_request(&req)).unwrap();
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Przetłumacz");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(provider.base_url, "http://localhost");
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Na dziś."}}]
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&config(&server.uri())).unwrap();
        let text = provider.complete(&request()).await.unwrap();
        assert_eq!(text, "Na dziś.");
    }

    #[tokio::test]
    async fn http_error_is_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&config(&server.uri())).unwrap();
        let err = provider.complete(&request()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"), "unexpected error: {msg}");
        assert!(msg.contains("invalid key"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(&config(&server.uri())).unwrap();
        assert!(provider.complete(&request()).await.is_err());
    }
}
