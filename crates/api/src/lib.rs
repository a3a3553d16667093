//! HTTP API for the retrieval-augmented chat service.
//!
//! Routes:
//!
//! - `GET  /health` - liveness probe
//! - `POST /api/chat/` - answer a question with retrieved context
//! - `POST /api/chat/stream` - SSE variant, chunks terminated by `[DONE]`
//! - `GET  /api/chat/history/:session_id` - session transcript
//! - `DELETE /api/chat/history/:session_id` - drop a session
//! - `POST /api/feedback/submit` - attach feedback to a logged message
//! - `GET  /api/feedback/history` - recent interaction records

pub mod chat;
pub mod config;
pub mod error;
pub mod feedback;
pub mod sessions;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use database::Database;
use llm_factory::LlmFactory;
use retrieval::DocumentIndex;

use crate::config::ApiConfig;
use crate::sessions::SessionStore;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub factory: Arc<LlmFactory>,
    pub index: Arc<DocumentIndex>,
    pub db: Database,
    pub sessions: Arc<SessionStore>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: String,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat/", post(chat::chat))
        .route("/api/chat/stream", post(chat::chat_stream))
        .route(
            "/api/chat/history/:session_id",
            get(chat::get_history).delete(chat::delete_history),
        )
        .route("/api/feedback/submit", post(feedback::submit_feedback))
        .route("/api/feedback/history", get(feedback::feedback_history))
        .with_state(state)
}
