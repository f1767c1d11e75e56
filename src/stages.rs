//! Prompt templates and stage orchestration.
//!
//! Three stages wired in sequence through session state:
//! - Requirements: Snowflake stored procedure → English requirements
//! - Pyspark: requirements → PySpark code
//! - Accuracy: PySpark code → self-reported accuracy percentage
//!
//! Each stage is one fixed instruction with the input appended, sent to a
//! stage-specific model. The model does all the conversion work; this module
//! only builds prompts and routes them.

use tracing::{debug, info};

use crate::config::Config;
use crate::llm::client::LlmError;
use crate::llm::types::TokenUsage;
use crate::llm::Inference;

/// Instruction for the requirements-extraction stage.
pub const REQUIREMENTS_PROMPT: &str =
    "Convert the following Snowflake stored procedure into requirements in English:";

/// Instruction for the code-generation stage.
pub const PYSPARK_PROMPT: &str = "Convert the following requirements into PySpark code:";

/// Instruction for the accuracy self-assessment stage.
pub const ACCURACY_PROMPT: &str = "Calculate the accuracy of the following PySpark code in %:";

/// One discrete prompt → inference → result step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Requirements,
    Pyspark,
    Accuracy,
}

impl Stage {
    /// Build the full prompt for this stage around the given input.
    pub fn prompt(&self, input: &str) -> String {
        let instruction = match self {
            Stage::Requirements => REQUIREMENTS_PROMPT,
            Stage::Pyspark => PYSPARK_PROMPT,
            Stage::Accuracy => ACCURACY_PROMPT,
        };
        format!("{instruction}\n\n{input}")
    }

    /// Model id for this stage. The coder model handles both conversion
    /// stages; the accuracy stage goes to the reasoning model.
    pub fn model<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Stage::Requirements | Stage::Pyspark => &config.coder_model,
            Stage::Accuracy => &config.reasoning_model,
        }
    }

    /// Stable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Requirements => "requirements",
            Stage::Pyspark => "pyspark",
            Stage::Accuracy => "accuracy",
        }
    }
}

/// Output of one stage run.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub text: String,
    pub usage: TokenUsage,
}

/// Run one stage against the inference collaborator.
///
/// Collaborator failures come back as `Err`; an unrecognized usage payload
/// is not a failure — it travels as [`TokenUsage::Unrecognized`] and formats
/// to the fixed fallback string downstream.
pub async fn run_stage(
    pool: &dyn Inference,
    config: &Config,
    stage: Stage,
    input: &str,
) -> Result<StageOutput, LlmError> {
    let prompt = stage.prompt(input);
    debug!(
        stage = stage.label(),
        prompt_chars = prompt.len(),
        "dispatching inference call"
    );

    let completion = pool.run(stage.model(config), &prompt).await?;
    info!(
        stage = stage.label(),
        output_chars = completion.content.len(),
        "stage completed"
    );

    Ok(StageOutput {
        text: completion.content,
        usage: completion.usage,
    })
}
