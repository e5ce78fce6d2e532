//! HTTP adapter - axum REST surface.

pub mod chat;

use axum::{routing::get, Router};

use chat::{chat_routes, ChatHandlers};

/// Builds the application router: chat endpoints under `/api/chat` plus a
/// liveness probe.
pub fn router(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/chat", chat_routes(handlers))
}

/// GET /health - liveness probe.
async fn health() -> &'static str {
    "ok"
}
