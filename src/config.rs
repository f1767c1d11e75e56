//! Startup configuration from the process environment.
//!
//! One required secret (the Groq API key); everything else has a default.
//! A missing credential is fatal before any UI is drawn.

/// Default model for the requirements and PySpark stages.
pub const DEFAULT_CODER_MODEL: &str = "qwen-2.5-coder-32b";
/// Default model for the accuracy self-assessment stage.
pub const DEFAULT_REASONING_MODEL: &str = "deepseek-r1-distill-llama-70b";

const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY environment variable not set (export it or add it to a .env file)")]
    MissingApiKey,
}

/// Loaded configuration for one process.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub coder_model: String,
    pub reasoning_model: String,
    pub max_tokens: u32,
}

impl Config {
    /// Load configuration from the environment. `.env` loading happens in
    /// main before this runs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: env_or("GROQ_BASE_URL", DEFAULT_BASE_URL),
            coder_model: env_or("CODECONV_CODER_MODEL", DEFAULT_CODER_MODEL),
            reasoning_model: env_or("CODECONV_REASONING_MODEL", DEFAULT_REASONING_MODEL),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// A config suitable for unit tests: no live credential, defaults elsewhere.
    pub fn for_tests() -> Self {
        Self {
            api_key: "test-key".into(),
            base_url: "http://localhost:1".into(),
            coder_model: DEFAULT_CODER_MODEL.into(),
            reasoning_model: DEFAULT_REASONING_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_fast() {
        std::env::remove_var("GROQ_API_KEY");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn env_or_prefers_set_value() {
        std::env::set_var("CODECONV_TEST_ENV_OR", "custom");
        assert_eq!(env_or("CODECONV_TEST_ENV_OR", "default"), "custom");
        std::env::remove_var("CODECONV_TEST_ENV_OR");
        assert_eq!(env_or("CODECONV_TEST_ENV_OR", "default"), "default");
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        std::env::set_var("CODECONV_TEST_BLANK", "   ");
        assert_eq!(env_or("CODECONV_TEST_BLANK", "default"), "default");
        std::env::remove_var("CODECONV_TEST_BLANK");
    }
}
