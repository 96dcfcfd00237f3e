//! HTTP client for the OpenAI chat-completions API.
//!
//! This module provides a reqwest-based implementation of the
//! [`PlanCompletionProvider`](crate::PlanCompletionProvider) trait. Each call
//! is a single request: no retries, no streaming, default client timeouts.

use crate::config::Config;
use crate::{FitplanError, PlanCompletionProvider};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Chat-completions client using reqwest.
#[derive(Clone, Debug)]
pub struct OpenAiCompletionClient {
    base_url: String,
    model: String,
    temperature: f32,
    api_key: SecretString,
    client: reqwest::Client,
}

impl OpenAiCompletionClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - API root including the version segment (e.g. "https://api.openai.com/v1")
    /// * `model` - Chat model name
    /// * `api_key` - Bearer token
    pub fn new(base_url: &str, model: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            temperature: crate::config::DEFAULT_TEMPERATURE,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, config.model.clone(), config.api_key.clone())
            .with_temperature(config.temperature)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> FitplanError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        let snippet: String = detail.chars().take(256).collect();
        FitplanError::PlanGeneration(format!("completion service returned {status}: {snippet}"))
    }
}

#[async_trait]
impl PlanCompletionProvider for OpenAiCompletionClient {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, FitplanError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "requesting plan completion");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                FitplanError::PlanGeneration(format!("completion request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        let parsed: ChatCompletionResponse = resp.json().await.map_err(|e| {
            FitplanError::PlanGeneration(format!("unreadable completion response: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                FitplanError::PlanGeneration("no content received from completion service".into())
            })
    }
}
