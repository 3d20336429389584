use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore, SemaphorePermit};

use crate::chat::session::Session;
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::GenerativeBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; a scripted backend in tests.
    pub llm: Arc<dyn GenerativeBackend>,
    pub config: Config,
    /// The single workspace session. Held only for short reads and writes,
    /// never across a model call.
    pub session: Arc<Mutex<Session>>,
    /// One permit: at most one model request in flight.
    model_slot: Arc<Semaphore>,
}

impl AppState {
    pub fn new(llm: Arc<dyn GenerativeBackend>, config: Config) -> Self {
        Self {
            llm,
            config,
            session: Arc::new(Mutex::new(Session::new())),
            model_slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Claims the model slot, or fails with 409 if a request is already running.
    pub fn claim_model_slot(&self) -> Result<SemaphorePermit<'_>, AppError> {
        self.model_slot.try_acquire().map_err(|_| {
            AppError::Conflict("Another request is still being processed".to_string())
        })
    }
}
