//! Inference collaborator — the opaque hosted model behind every stage.
//!
//! Wraps GroqClient behind the [`Inference`] seam: model id + prompt in,
//! generated text + token accounting out. The command layer only ever sees
//! the trait, so tests substitute a deterministic stub.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use client::{GroqClient, LlmError};
use types::{ChatMessage, ChatRequest, TokenUsage};

/// One completed inference call: generated text plus token accounting.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

/// Opaque inference collaborator.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Run one prompt against one model. Single attempt, no retries.
    async fn run(&self, model: &str, prompt: &str) -> Result<Completion, LlmError>;
}

/// Inference pool over the Groq API.
#[derive(Debug)]
pub struct InferencePool {
    client: GroqClient,
    max_tokens: u32,
}

impl InferencePool {
    /// Create a pool with an explicit API key.
    pub fn new(api_key: String, max_tokens: u32) -> Self {
        Self {
            client: GroqClient::new(api_key),
            max_tokens,
        }
    }

    /// Create a pool from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: GroqClient::with_base_url(config.api_key.clone(), config.base_url.clone()),
            max_tokens: config.max_tokens,
        }
    }

    /// Create a pool with a custom base URL (for testing).
    pub fn with_base_url(api_key: String, base_url: String, max_tokens: u32) -> Self {
        Self {
            client: GroqClient::with_base_url(api_key, base_url),
            max_tokens,
        }
    }
}

#[async_trait]
impl Inference for InferencePool {
    async fn run(&self, model: &str, prompt: &str) -> Result<Completion, LlmError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: Some(self.max_tokens),
            temperature: None,
        };

        let resp = self.client.chat(&request).await?;
        debug!(
            model,
            response_id = %resp.id,
            response_model = %resp.model,
            finish_reason = ?resp.choices.first().and_then(|c| c.finish_reason.as_deref()),
            "inference call completed"
        );

        let content = resp
            .text()
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".into()))?
            .to_string();
        let usage = TokenUsage::from_value(&resp.usage);

        Ok(Completion { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_creation() {
        let pool = InferencePool::new("test-key".into(), 4096);
        assert_eq!(pool.max_tokens, 4096);
    }

    #[test]
    fn pool_from_config() {
        let config = Config {
            api_key: "k".into(),
            base_url: "http://localhost:9999".into(),
            coder_model: "qwen-2.5-coder-32b".into(),
            reasoning_model: "deepseek-r1-distill-llama-70b".into(),
            max_tokens: 2048,
        };
        let pool = InferencePool::from_config(&config);
        assert_eq!(pool.max_tokens, 2048);
    }

    #[test]
    fn pool_with_custom_base_url() {
        let pool = InferencePool::with_base_url("key".into(), "http://localhost:9999".into(), 512);
        assert_eq!(pool.max_tokens, 512);
    }
}
