//! HTTP client for an OpenAI-compatible provider (chat + embeddings)
//!
//! One call, one outcome: there is no retry loop, because every caller in
//! the pipeline treats a provider failure as expected and falls back to mock
//! data immediately. Each request is additionally bounded by the configured
//! timeout.

use super::EmbeddingProvider;
use crate::config::AiConfig;
use crate::error::{ResumeMatcherError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    embedding_model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
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
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingObject>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingObject {
    embedding: Vec<f32>,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ResumeMatcherError::Configuration("live AI mode requires an API key".to_string())
        })?;

        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            timeout: config.timeout(),
        })
    }

    /// One chat completion returning plain text.
    pub async fn chat_text(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        self.send_chat(system, user, max_tokens, None).await
    }

    /// One chat completion in JSON mode, parsed into a `serde_json::Value`.
    /// A response that isn't valid JSON (after fence stripping) is a
    /// validation failure, not a transport one.
    pub async fn chat_json(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<serde_json::Value> {
        let text = self
            .send_chat(
                system,
                user,
                max_tokens,
                Some(ResponseFormat {
                    format_type: "json_object",
                }),
            )
            .await?;

        let stripped = strip_json_fences(&text);
        serde_json::from_str(stripped).map_err(|e| {
            ResumeMatcherError::Validation(format!("provider returned invalid JSON: {}", e))
        })
    }

    async fn send_chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        response_format: Option<ResponseFormat>,
    ) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.3,
            max_tokens,
            response_format,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                ResumeMatcherError::ExternalCapability(format!(
                    "chat completion timed out after {:?}",
                    self.timeout
                ))
            })??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResumeMatcherError::ExternalCapability(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        log::debug!("chat completion succeeded ({} choices)", parsed.choices.len());

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                ResumeMatcherError::ExternalCapability("provider returned empty content".to_string())
            })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingsRequest {
            model: &self.embedding_model,
            input: texts,
        };

        let url = format!("{}/embeddings", self.base_url);
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| {
                ResumeMatcherError::ExternalCapability(format!(
                    "embedding request timed out after {:?}",
                    self.timeout
                ))
            })??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResumeMatcherError::ExternalCapability(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingsResponse = response.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(ResumeMatcherError::Validation(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences some models wrap JSON in.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiMode;

    #[test]
    fn test_strip_json_fences_with_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_plain() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = AiConfig {
            mode: AiMode::Live,
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: "text-embedding-3-small".into(),
            timeout_ms: 1000,
        };
        assert!(matches!(
            OpenAiClient::new(&config),
            Err(ResumeMatcherError::Configuration(_))
        ));
    }
}
