//! Axum route handlers for the session, chat and upload API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::chat::conversation::send_message;
use crate::chat::models::{FileSummary, Message, UploadedFile};
use crate::chat::uploads::{accept_data_url, accept_upload};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub messages: Vec<Message>,
    pub files: Vec<FileSummary>,
    pub has_evaluation: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: Message,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub files: Vec<FileSummary>,
    pub reply: Message,
}

#[derive(Debug, Deserialize)]
pub struct InlineUpload {
    pub name: String,
    /// Data URL or bare base64.
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct InlineUploadRequest {
    pub files: Vec<InlineUpload>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView {
        messages: session.messages().to_vec(),
        files: session.file_summaries(),
        has_evaluation: session.evaluation().is_some(),
    })
}

/// POST /api/v1/session/reset
pub async fn handle_reset_session(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let _slot = state.claim_model_slot()?;
    state.session.lock().await.reset();
    info!("Session reset");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/chat/messages
///
/// Sends the message with every uploaded file attached and returns the reply.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let _slot = state.claim_model_slot()?;

    let (history, files) = {
        let mut session = state.session.lock().await;
        let history = session.begin_turn(text);
        (history, session.inline_files())
    };

    let reply_text = send_message(state.llm.as_ref(), &history, text, files).await;

    let reply = {
        let mut session = state.session.lock().await;
        session.push_model(reply_text);
        session
            .messages()
            .last()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("reply was not recorded")))?
    };

    Ok(Json(ChatResponse { reply }))
}

/// POST /api/v1/files
///
/// Multipart upload. Every part with a file name is taken as a file.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let max_bytes = state.config.max_upload_bytes;
    let mut uploaded = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes: bytes::Bytes = field.bytes().await.map_err(multipart_error)?;
        uploaded.push(accept_upload(&name, content_type.as_deref(), &bytes, max_bytes)?);
    }

    analyze_uploads(&state, uploaded).await.map(Json)
}

/// POST /api/v1/files/inline
///
/// JSON upload of data URLs, as produced by a browser `FileReader`.
pub async fn handle_inline_upload(
    State(state): State<AppState>,
    Json(request): Json<InlineUploadRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    let max_bytes = state.config.max_upload_bytes;
    let uploaded = request
        .files
        .iter()
        .map(|f| accept_data_url(&f.name, &f.data, max_bytes))
        .collect::<Result<Vec<_>, _>>()?;

    analyze_uploads(&state, uploaded).await.map(Json)
}

/// Attaches new files and runs the automatic analysis turn on them alone.
async fn analyze_uploads(
    state: &AppState,
    uploaded: Vec<UploadedFile>,
) -> Result<UploadResponse, AppError> {
    if uploaded.is_empty() {
        return Err(AppError::Validation("no files were uploaded".to_string()));
    }

    let _slot = state.claim_model_slot()?;

    let summaries: Vec<FileSummary> = uploaded.iter().map(UploadedFile::summary).collect();
    let new_files = uploaded.iter().map(UploadedFile::to_inline).collect();
    info!(count = uploaded.len(), "Files uploaded");

    let (announcement, history) = state.session.lock().await.add_files(uploaded);

    let reply_text = send_message(state.llm.as_ref(), &history, &announcement, new_files).await;

    let reply = {
        let mut session = state.session.lock().await;
        session.push_model(reply_text);
        session
            .messages()
            .last()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("reply was not recorded")))?
    };

    Ok(UploadResponse {
        files: summaries,
        reply,
    })
}

/// DELETE /api/v1/files/:id
pub async fn handle_delete_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = state.session.lock().await.remove_file(id);
    match removed {
        Some(file) => {
            info!("Removed file {}", file.name);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound(format!("File {id} not found"))),
    }
}
