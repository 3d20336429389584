//! Axum route handlers for the Evaluation API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::generator::generate_evaluation;
use crate::evaluation::models::EvaluationResult;
use crate::evaluation::prompts::{EVALUATION_FAILED, EVALUATION_READY};
use crate::export::deck::{build_deck, metric_bars, DeckOutline, MetricBar};
use crate::export::json::{download_filename, to_pretty_json};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationView {
    pub evaluation: EvaluationResult,
    pub metric_bars: Vec<MetricBar>,
}

impl From<EvaluationResult> for EvaluationView {
    fn from(evaluation: EvaluationResult) -> Self {
        let metric_bars = metric_bars(&evaluation.metrics);
        Self {
            evaluation,
            metric_bars,
        }
    }
}

async fn current_evaluation(state: &AppState) -> Result<EvaluationResult, AppError> {
    state
        .session
        .lock()
        .await
        .evaluation()
        .cloned()
        .ok_or_else(|| AppError::NotFound("No evaluation has been generated yet".to_string()))
}

/// POST /api/v1/evaluation
///
/// Generates (or regenerates) the evaluation from the whole conversation and
/// every uploaded file.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<EvaluationView>, AppError> {
    let _slot = state.claim_model_slot()?;

    let (history, files) = {
        let session = state.session.lock().await;
        if !session.can_evaluate() {
            return Err(AppError::UnprocessableEntity(
                "Upload a document or send a message before generating an evaluation".to_string(),
            ));
        }
        (session.messages().to_vec(), session.inline_files())
    };

    match generate_evaluation(state.llm.as_ref(), &history, files).await {
        Ok(evaluation) => {
            let mut session = state.session.lock().await;
            session.set_evaluation(evaluation.clone());
            session.push_model(EVALUATION_READY);
            Ok(Json(evaluation.into()))
        }
        Err(e) => {
            state.session.lock().await.push_model(EVALUATION_FAILED);
            Err(e)
        }
    }
}

/// GET /api/v1/evaluation
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
) -> Result<Json<EvaluationView>, AppError> {
    let evaluation = current_evaluation(&state).await?;
    Ok(Json(evaluation.into()))
}

/// GET /api/v1/evaluation/export.json
///
/// The evaluation as a pretty-printed JSON attachment.
pub async fn handle_export_json(State(state): State<AppState>) -> Result<Response, AppError> {
    let evaluation = current_evaluation(&state).await?;
    let body = to_pretty_json(&evaluation)?;
    let disposition = format!("attachment; filename=\"{}\"", download_filename(&evaluation));

    Ok((
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/evaluation/deck
pub async fn handle_deck(State(state): State<AppState>) -> Result<Json<DeckOutline>, AppError> {
    let evaluation = current_evaluation(&state).await?;
    Ok(Json(build_deck(&evaluation)))
}
