//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::dialogue::{
    EndSessionCommand, EndSessionHandler, FieldSuggestionsHandler, FieldSuggestionsQuery,
    GetSessionError, GetSessionHandler, GetSessionQuery, ProcessTurnCommand, ProcessTurnError,
    ProcessTurnHandler, StartSessionCommand, StartSessionError, StartSessionHandler,
    UpdateFieldCommand, UpdateFieldError, UpdateFieldHandler, ValidateFieldHandler,
    ValidateFieldQuery,
};
use crate::domain::catalog::FieldKey;
use crate::domain::foundation::SessionId;

use super::dto::{
    EndSessionRequest, EndSessionResponse, ErrorResponse, StartSessionRequest,
    StartSessionResponse, SuggestionsRequest, SuggestionsResponse, TurnRequest, TurnResponse,
    UpdateFieldRequest, UpdateFieldResponse, ValidateRequest, ValidateResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application handlers wired into the chat routes.
#[derive(Clone)]
pub struct ChatHandlers {
    start_handler: Arc<StartSessionHandler>,
    turn_handler: Arc<ProcessTurnHandler>,
    end_handler: Arc<EndSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    update_handler: Arc<UpdateFieldHandler>,
    suggestions_handler: FieldSuggestionsHandler,
    validate_handler: ValidateFieldHandler,
}

impl ChatHandlers {
    /// Bundles the application handlers for routing.
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        turn_handler: Arc<ProcessTurnHandler>,
        end_handler: Arc<EndSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        update_handler: Arc<UpdateFieldHandler>,
    ) -> Self {
        Self {
            start_handler,
            turn_handler,
            end_handler,
            get_handler,
            update_handler,
            suggestions_handler: FieldSuggestionsHandler::new(),
            validate_handler: ValidateFieldHandler::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/start - open a session
pub async fn start_session(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<StartSessionRequest>,
) -> Response {
    let fields = match req.fields {
        Some(names) => match parse_fields(&names) {
            Ok(fields) => Some(fields),
            Err(name) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(format!("Unknown field: {name}"))),
                )
                    .into_response()
            }
        },
        None => None,
    };

    match handlers.start_handler.handle(StartSessionCommand { fields }).await {
        Ok(result) => {
            let response: StartSessionResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(StartSessionError::Validation(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        Err(StartSessionError::Storage(message)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

/// POST /api/chat/turn - process one utterance
pub async fn process_turn(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<TurnRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let current_field = match req.current_field.as_deref() {
        Some(name) => match name.parse::<FieldKey>() {
            Ok(field) => Some(field),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(format!("Unknown field: {name}"))),
                )
                    .into_response()
            }
        },
        None => None,
    };

    let cmd = ProcessTurnCommand {
        session_id,
        utterance: req.utterance,
        current_field,
    };

    match handlers.turn_handler.handle(cmd).await {
        Ok(result) => {
            let response: TurnResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => handle_turn_error(err),
    }
}

/// POST /api/chat/end - dispose a session
pub async fn end_session(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<EndSessionRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    match handlers.end_handler.handle(EndSessionCommand { session_id }).await {
        Ok(result) => (StatusCode::OK, Json(EndSessionResponse { ok: result.ok })).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(err.to_string())),
        )
            .into_response(),
    }
}

/// GET /api/chat/sessions/:id - session read-back
pub async fn get_session(
    State(handlers): State<ChatHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(view) => {
            let response: super::dto::SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(GetSessionError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("Session not found: {id}"))),
        )
            .into_response(),
        Err(GetSessionError::Storage(message)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

/// POST /api/chat/update-field - direct field override
pub async fn update_field(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<UpdateFieldRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let field = match req.field.parse::<FieldKey>() {
        Ok(field) => field,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "Unknown field: {}",
                    req.field
                ))),
            )
                .into_response()
        }
    };

    let cmd = UpdateFieldCommand {
        session_id,
        field,
        value: req.value,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(()) => (StatusCode::OK, Json(UpdateFieldResponse { ok: true })).into_response(),
        Err(UpdateFieldError::EmptyValue) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Value cannot be empty")),
        )
            .into_response(),
        Err(UpdateFieldError::SessionNotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("Session not found: {id}"))),
        )
            .into_response(),
        Err(UpdateFieldError::Storage(message)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

/// POST /api/chat/suggestions - example values for a field
pub async fn field_suggestions(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<SuggestionsRequest>,
) -> Response {
    match req.field.parse::<FieldKey>() {
        Ok(field) => {
            let suggestions = handlers
                .suggestions_handler
                .handle(FieldSuggestionsQuery { field });
            (StatusCode::OK, Json(SuggestionsResponse { suggestions })).into_response()
        }
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Unknown field: {}",
                req.field
            ))),
        )
            .into_response(),
    }
}

/// POST /api/chat/validate - validate a candidate value
pub async fn validate_field(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ValidateRequest>,
) -> Response {
    match req.field.parse::<FieldKey>() {
        Ok(field) => {
            let outcome = handlers.validate_handler.handle(ValidateFieldQuery {
                field,
                value: req.value,
            });
            let response: ValidateResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Unknown field: {}",
                req.field
            ))),
        )
            .into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_turn_error(err: ProcessTurnError) -> Response {
    match err {
        ProcessTurnError::EmptyUtterance => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(err.to_string())),
        )
            .into_response(),
        ProcessTurnError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("Session not found: {id}"))),
        )
            .into_response(),
        ProcessTurnError::Storage(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

fn parse_fields(names: &[String]) -> Result<Vec<FieldKey>, String> {
    names
        .iter()
        .map(|name| name.parse::<FieldKey>().map_err(|_| name.clone()))
        .collect()
}
