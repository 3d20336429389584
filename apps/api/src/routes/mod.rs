pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::evaluation::handlers as evaluation;
use crate::state::AppState;

/// Files per upload request the body limit leaves room for.
const FILES_PER_REQUEST: usize = 8;
/// Multipart boundaries, headers and base64 growth for JSON uploads.
const BODY_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(FILES_PER_REQUEST)
        .saturating_mul(4)
        / 3
        + BODY_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session", get(chat::handle_get_session))
        .route("/api/v1/session/reset", post(chat::handle_reset_session))
        // Chat & uploads
        .route("/api/v1/chat/messages", post(chat::handle_chat))
        .route("/api/v1/files", post(chat::handle_upload))
        .route("/api/v1/files/inline", post(chat::handle_inline_upload))
        .route("/api/v1/files/:id", delete(chat::handle_delete_file))
        // Evaluation & exports
        .route(
            "/api/v1/evaluation",
            get(evaluation::handle_get_evaluation).post(evaluation::handle_generate),
        )
        .route(
            "/api/v1/evaluation/export.json",
            get(evaluation::handle_export_json),
        )
        .route("/api/v1/evaluation/deck", get(evaluation::handle_deck))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
