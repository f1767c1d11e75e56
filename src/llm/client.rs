//! Raw HTTP client for the Groq chat completions API.
//!
//! No stage awareness — just makes API calls via reqwest.

use reqwest::Client;

use super::types::{ChatRequest, ChatResponse};

/// Errors from LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Raw HTTP client for the Groq OpenAI-compatible endpoint.
#[derive(Debug)]
pub struct GroqClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    /// Create a client with default base URL (https://api.groq.com).
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://api.groq.com".into())
    }

    /// Create a client with a custom base URL (for testing with mock servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Send a chat completions request. Single best-effort attempt, no retries.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(LlmError::RateLimited { retry_after });
        }

        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        let resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::ChatMessage;

    #[test]
    fn client_creation() {
        let client = GroqClient::new("test-key".into());
        assert_eq!(client.base_url, "https://api.groq.com");
    }

    #[test]
    fn client_custom_base_url() {
        let client = GroqClient::with_base_url("test-key".into(), "http://localhost:8080".into());
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn request_builds_correctly() {
        let req = ChatRequest {
            model: "qwen-2.5-coder-32b".into(),
            messages: vec![ChatMessage::user("Hello")],
            max_tokens: Some(1024),
            temperature: Some(0.7),
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "qwen-2.5-coder-32b");
        assert_eq!(json["max_tokens"], 1024);
        // f32 precision: 0.7f32 round-trips through JSON as ~0.699999988
        let temp = json["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 0.001);
        assert_eq!(json["messages"][0]["content"], "Hello");
    }

    #[test]
    fn error_display() {
        let err = LlmError::ApiError {
            status: 401,
            message: "invalid api key".into(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));

        let err = LlmError::RateLimited {
            retry_after: Some(30),
        };
        assert!(err.to_string().contains("rate limited"));

        let err = LlmError::InvalidResponse("no choices".into());
        assert!(err.to_string().contains("invalid response"));
    }
}
