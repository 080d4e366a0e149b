//! Configuration for the matching and scoring pipeline
//!
//! The whole configuration is an immutable value threaded through
//! [`crate::engine::AnalysisEngine`]; internal functions never consult the
//! environment themselves. `Config::from_env` exists purely as a convenience
//! constructor for deployments that configure via environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ai: AiConfig,
    pub matching: MatchingConfig,
    pub scoring: ScoringConfig,
}

/// How the external AI capabilities (extraction, embeddings, feedback) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    /// Call the configured external provider.
    Live,
    /// Deterministic fixed sample data, no network.
    Mock,
    /// Empty/neutral defaults, no network.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub mode: AiMode,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    /// Upper bound for a single provider call. On expiry the call is treated
    /// as a capability failure and the mock path takes over.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// When false the tiered matcher is bypassed entirely in favor of the
    /// substring-containment fallback matcher.
    pub semantic_matching: bool,
    /// Edit-distance similarity floor for the fuzzy tier.
    pub fuzzy_threshold: f64,
    /// Cosine similarity floor for the semantic tier.
    pub semantic_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Cap on total years of experience summed from date ranges.
    pub max_total_years: f64,
    /// Points deducted from the skills score per unmatched critical skill.
    pub critical_gap_penalty: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                mode: AiMode::Mock,
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                embedding_model: "text-embedding-3-small".to_string(),
                timeout_ms: 10_000,
            },
            matching: MatchingConfig {
                semantic_matching: true,
                fuzzy_threshold: 0.8,
                semantic_threshold: 0.3,
            },
            scoring: ScoringConfig {
                max_total_years: 20.0,
                critical_gap_penalty: 10.0,
            },
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// `OPENAI_API_KEY` plus `ENABLE_AI_SUGGESTIONS` (default on) select live
    /// mode; `MOCK_AI_SUGGESTIONS=true` forces mock mode; otherwise the
    /// capabilities are disabled.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let ai_enabled = std::env::var("ENABLE_AI_SUGGESTIONS")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        let mock = std::env::var("MOCK_AI_SUGGESTIONS")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        config.ai.mode = if mock {
            AiMode::Mock
        } else if api_key.is_some() && ai_enabled {
            AiMode::Live
        } else {
            AiMode::Disabled
        };
        config.ai.api_key = api_key;

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.ai.model = model;
        }
        if let Ok(model) = std::env::var("OPENAI_EMBEDDING_MODEL") {
            config.ai.embedding_model = model;
        }
        if let Some(ms) = std::env::var("OPENAI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.ai.timeout_ms = ms;
        }

        config.matching.semantic_matching = std::env::var("ENABLE_SEMANTIC_MATCHING")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.ai.timeout_ms)
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
