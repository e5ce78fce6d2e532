//! HTTP DTOs for chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution. Field keys travel as their camelCase wire names.

use serde::{Deserialize, Serialize};

use crate::application::handlers::dialogue::{
    ProcessTurnResult, SessionView, StartSessionResult, ValidationOutcome,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to open a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    /// Fields to collect, in order; omitted means the full set.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// Request to process one utterance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub session_id: String,
    pub utterance: String,
    #[serde(default)]
    pub current_field: Option<String>,
}

/// Request to dispose a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionRequest {
    pub session_id: String,
}

/// Request to override one field's value directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    pub session_id: String,
    pub field: String,
    pub value: String,
}

/// Request for a field's example values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub field: String,
}

/// Request to validate a candidate value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub field: String,
    pub value: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response to session start.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub first_prompt: String,
    pub first_field: String,
    pub suggestions: Vec<String>,
}

impl From<StartSessionResult> for StartSessionResponse {
    fn from(result: StartSessionResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            first_prompt: result.first_prompt,
            first_field: result.first_field.to_string(),
            suggestions: result.suggestions,
        }
    }
}

/// Response to one processed turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub suggestions: Vec<String>,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    pub completed: bool,
}

impl From<ProcessTurnResult> for TurnResponse {
    fn from(result: ProcessTurnResult) -> Self {
        Self {
            message: result.message,
            field: result.field.map(|f| f.to_string()),
            value: result.value,
            suggestions: result.suggestions,
            confidence: result.confidence,
            items: result.items,
            completed: result.completed,
        }
    }
}

/// Response to session disposal.
#[derive(Debug, Clone, Serialize)]
pub struct EndSessionResponse {
    pub ok: bool,
}

/// Response to a direct field override.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFieldResponse {
    pub ok: bool,
}

/// One filled field in a session view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledFieldResponse {
    pub field: String,
    pub value: String,
}

/// Detailed session view for read-back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub ordered_fields: Vec<String>,
    pub cursor: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_field: Option<String>,
    pub filled_fields: Vec<FilledFieldResponse>,
    pub history_len: usize,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            ordered_fields: view.ordered_fields.iter().map(|f| f.to_string()).collect(),
            cursor: view.cursor,
            current_field: view.current_field.map(|f| f.to_string()),
            filled_fields: view
                .filled_fields
                .into_iter()
                .map(|(field, value)| FilledFieldResponse {
                    field: field.to_string(),
                    value,
                })
                .collect(),
            history_len: view.history_len,
            completed: view.completed,
            created_at: view.created_at.as_datetime().to_rfc3339(),
            updated_at: view.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response carrying example values.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// Response to value validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
}

impl From<ValidationOutcome> for ValidateResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            valid: outcome.valid,
            message: outcome.message,
        }
    }
}

/// Structured error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    /// 400-class error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.into(),
        }
    }

    /// 404-class error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.into(),
        }
    }

    /// 500-class error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_response_omits_empty_optionals() {
        let response = TurnResponse {
            message: "m".to_string(),
            field: None,
            value: None,
            suggestions: vec![],
            confidence: 0.8,
            items: vec![],
            completed: false,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"field\""));
        assert!(!json.contains("\"value\""));
        assert!(!json.contains("\"items\""));
    }

    #[test]
    fn requests_use_camel_case() {
        let request: TurnRequest = serde_json::from_str(
            r#"{"sessionId": "abc", "utterance": "hi", "currentField": "headcount"}"#,
        )
        .unwrap();
        assert_eq!(request.session_id, "abc");
        assert_eq!(request.current_field.as_deref(), Some("headcount"));
    }
}
