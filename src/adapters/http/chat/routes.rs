//! HTTP routes for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    end_session, field_suggestions, get_session, process_turn, start_session, update_field,
    validate_field, ChatHandlers,
};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/start", post(start_session))
        .route("/turn", post(process_turn))
        .route("/end", post(end_session))
        .route("/sessions/:id", get(get_session))
        .route("/update-field", post(update_field))
        .route("/suggestions", post(field_suggestions))
        .route("/validate", post(validate_field))
        .with_state(handlers)
}
