//! Evaluation generation: asks the model for the structured evaluation and
//! replaces its metric values with sanitized scores.
//!
//! Flow: history + files → Gemini (JSON schema) → RawEvaluation →
//!       sanitize + aggregate → EvaluationResult.

use tracing::{info, warn};

use crate::chat::models::Message;
use crate::errors::AppError;
use crate::evaluation::models::{EvaluationResult, RawEvaluation};
use crate::evaluation::prompts::{generation_system_instruction, response_schema, GENERATION_PROMPT};
use crate::evaluation::scoring::score_raw;
use crate::llm_client::{generate_json, GenerateRequest, GenerativeBackend, InlineFile};

/// Builds the text part: `role: text` per history message, then the
/// generation prompt.
pub fn build_generation_prompt(history: &[Message]) -> String {
    let mut prompt = String::new();
    for msg in history {
        prompt.push_str(msg.role.as_str());
        prompt.push_str(": ");
        prompt.push_str(&msg.text);
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(GENERATION_PROMPT);
    prompt
}

/// Scores a parsed model reply. Model-supplied totals never survive.
pub fn finalize(raw: RawEvaluation) -> EvaluationResult {
    let outcome = score_raw(
        &raw.metrics.fame,
        &raw.metrics.fun,
        &raw.metrics.money,
        &raw.metrics.strategy,
    );

    EvaluationResult {
        details: raw.details,
        metrics: outcome.into(),
        nb_info: raw.nb_info,
        missing_info: raw.missing_info,
    }
}

/// Generates a fresh evaluation from the whole conversation and all uploads.
pub async fn generate_evaluation(
    backend: &dyn GenerativeBackend,
    history: &[Message],
    files: Vec<InlineFile>,
) -> Result<EvaluationResult, AppError> {
    let request = GenerateRequest {
        system_instruction: generation_system_instruction(),
        text: build_generation_prompt(history),
        files,
        temperature: None,
        response_schema: Some(response_schema()),
    };

    let raw: RawEvaluation = generate_json(backend, &request).await.map_err(|e| {
        warn!("Evaluation generation failed: {e}");
        AppError::Llm(format!("Evaluation generation failed: {e}"))
    })?;

    let result = finalize(raw);
    info!(
        total = result.metrics.total,
        recommendation = %result.metrics.recommendation,
        "Evaluation generated"
    );

    Ok(result)
}
