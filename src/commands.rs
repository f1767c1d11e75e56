//! Explicit command handlers for the four user actions.
//!
//! Each handler takes the current session state plus the inference seam,
//! performs at most one inference call, and writes one group of fields back.
//! Gating violations (a stage triggered before its upstream field exists)
//! return a guidance error without touching state or the collaborator.

use crate::config::Config;
use crate::llm::client::LlmError;
use crate::llm::Inference;
use crate::session::SessionState;
use crate::stages::{run_stage, Stage};

/// The user-triggerable actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadProcedure,
    SaveRequirements,
    ConvertToPyspark,
    CalculateAccuracy,
}

impl Action {
    /// Label shown while the action is running.
    pub fn label(&self) -> &'static str {
        match self {
            Action::ReadProcedure => "Reading Snowflake procedure...",
            Action::SaveRequirements => "Saving requirements...",
            Action::ConvertToPyspark => "Converting to PySpark...",
            Action::CalculateAccuracy => "Calculating accuracy...",
        }
    }
}

/// Recoverable failures of a user action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Paste a Snowflake stored procedure before reading it.")]
    EmptyProcedure,

    #[error("Please generate the requirements first by clicking 'Read Snowflake'.")]
    MissingRequirements,

    #[error("Please generate the PySpark code first by clicking 'Convert to PySpark'.")]
    MissingGeneratedCode,

    #[error("Inference failed: {0}")]
    Inference(#[from] LlmError),
}

/// Stage 1: procedure text → English requirements.
pub async fn read_procedure(
    state: &mut SessionState,
    pool: &dyn Inference,
    config: &Config,
) -> Result<String, ActionError> {
    if state.procedure.trim().is_empty() {
        return Err(ActionError::EmptyProcedure);
    }

    let out = run_stage(pool, config, Stage::Requirements, &state.procedure).await?;
    state.requirements = out.text;
    state.requirements_metrics = out.usage.to_string();
    Ok("Requirements generated.".into())
}

/// Persist the user's edited requirements text into the session.
pub fn save_requirements(state: &mut SessionState, edited: &str) -> Result<String, ActionError> {
    state.requirements = edited.to_string();
    Ok("Requirements saved successfully!".into())
}

/// Stage 2: requirements → PySpark code. Refuses to run before stage 1.
pub async fn convert_to_pyspark(
    state: &mut SessionState,
    pool: &dyn Inference,
    config: &Config,
) -> Result<String, ActionError> {
    if state.requirements.trim().is_empty() {
        return Err(ActionError::MissingRequirements);
    }

    let out = run_stage(pool, config, Stage::Pyspark, &state.requirements).await?;
    state.pyspark_code = out.text;
    state.pyspark_metrics = out.usage.to_string();
    Ok("PySpark code generated.".into())
}

/// Stage 3: PySpark code → self-reported accuracy. Refuses to run before stage 2.
pub async fn calculate_accuracy(
    state: &mut SessionState,
    pool: &dyn Inference,
    config: &Config,
) -> Result<String, ActionError> {
    if state.pyspark_code.trim().is_empty() {
        return Err(ActionError::MissingGeneratedCode);
    }

    let out = run_stage(pool, config, Stage::Accuracy, &state.pyspark_code).await?;
    state.accuracy_report = out.text;
    state.accuracy_metrics = out.usage.to_string();
    Ok("Accuracy calculated.".into())
}
