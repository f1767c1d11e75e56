//! Rust types for the Groq chat completions API.
//!
//! Serde-serializable to JSON for HTTP calls. The usage payload stays raw
//! JSON until formatting time — the shape the service returns is not trusted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback shown when the usage payload cannot be interpreted.
pub const METRICS_FALLBACK: &str = "Metrics data is not in the expected format.";

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    /// Raw usage payload. Parsed into [`TokenUsage`] at the formatting
    /// boundary instead of at deserialization time.
    #[serde(default)]
    pub usage: Value,
}

/// A single completion choice in the response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Text content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Token accounting returned alongside generated text.
///
/// The service reports usage in more than one shape: the OpenAI-style scalar
/// mapping (`prompt_tokens`/`completion_tokens`/`total_tokens`), and agent
/// frameworks that aggregate per-message counts into lists under
/// `input_tokens`/`output_tokens`/`total_tokens`. Anything else is kept raw
/// and formats to [`METRICS_FALLBACK`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenUsage {
    Structured {
        input_tokens: u64,
        output_tokens: u64,
        total_tokens: u64,
    },
    Unrecognized(Value),
}

impl TokenUsage {
    /// Interpret a raw usage payload.
    ///
    /// A count may be a plain integer or a list of integers (first element
    /// wins). All three counts must resolve or the payload is unrecognized.
    pub fn from_value(usage: &Value) -> Self {
        let Some(map) = usage.as_object() else {
            return Self::Unrecognized(usage.clone());
        };

        let count = |primary: &str, alias: &str| -> Option<u64> {
            let v = map.get(primary).or_else(|| map.get(alias))?;
            match v {
                Value::Number(n) => n.as_u64(),
                Value::Array(items) => items.first().and_then(Value::as_u64),
                _ => None,
            }
        };

        match (
            count("input_tokens", "prompt_tokens"),
            count("output_tokens", "completion_tokens"),
            count("total_tokens", "total_tokens"),
        ) {
            (Some(input_tokens), Some(output_tokens), Some(total_tokens)) => Self::Structured {
                input_tokens,
                output_tokens,
                total_tokens,
            },
            _ => Self::Unrecognized(usage.clone()),
        }
    }
}

impl std::fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenUsage::Structured {
                input_tokens,
                output_tokens,
                total_tokens,
            } => write!(
                f,
                "input_tokens={input_tokens}, output_tokens={output_tokens}, total_tokens={total_tokens}"
            ),
            TokenUsage::Unrecognized(_) => f.write_str(METRICS_FALLBACK),
        }
    }
}
