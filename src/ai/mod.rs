//! External AI capability plumbing
//!
//! Everything the pipeline cannot compute locally (skill extraction, domain
//! detection, embeddings, feedback prose) goes through [`AiRuntime`], which
//! dispatches on the configured [`AiMode`]. Capability methods never
//! propagate provider failures: a timeout, transport error, or schema-invalid
//! response downgrades to the deterministic mock path at the call site.

pub mod assessment;
pub mod client;
pub mod extraction;

use crate::config::{AiConfig, AiMode};
use crate::error::Result;
use async_trait::async_trait;
use client::OpenAiClient;

/// Batch text embedding capability.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Owns the configured mode and, in live mode, the provider client.
pub struct AiRuntime {
    mode: AiMode,
    client: Option<OpenAiClient>,
}

impl AiRuntime {
    pub fn new(config: &AiConfig) -> Self {
        match config.mode {
            AiMode::Live => match OpenAiClient::new(config) {
                Ok(client) => Self {
                    mode: AiMode::Live,
                    client: Some(client),
                },
                Err(e) => {
                    log::warn!("live AI unavailable ({}), capabilities disabled", e);
                    Self {
                        mode: AiMode::Disabled,
                        client: None,
                    }
                }
            },
            mode => Self { mode, client: None },
        }
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub(crate) fn client(&self) -> Option<&OpenAiClient> {
        self.client.as_ref()
    }

    /// The embedding capability; only available in live mode. Callers skip
    /// the semantic tier when this returns `None`.
    pub fn embedder(&self) -> Option<&dyn EmbeddingProvider> {
        self.client
            .as_ref()
            .map(|client| client as &dyn EmbeddingProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runtime_has_no_embedder() {
        let runtime = AiRuntime::new(&AiConfig {
            mode: AiMode::Mock,
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: "text-embedding-3-small".into(),
            timeout_ms: 1000,
        });
        assert_eq!(runtime.mode(), AiMode::Mock);
        assert!(runtime.embedder().is_none());
    }

    #[test]
    fn test_live_without_key_downgrades() {
        let runtime = AiRuntime::new(&AiConfig {
            mode: AiMode::Live,
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            embedding_model: "text-embedding-3-small".into(),
            timeout_ms: 1000,
        });
        assert_eq!(runtime.mode(), AiMode::Disabled);
    }
}
