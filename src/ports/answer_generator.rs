//! Answer generator port - interface to the generative-answer backend.
//!
//! The dialogue engine only reaches this port from the question branch of
//! the classifier and from conversational extraction; its output is opaque
//! text passed through unmodified. Failures never propagate to the user as
//! errors: callers degrade to a static apology and leave session state
//! untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for generating free-text answers.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generates an answer for the given prompt.
    ///
    /// Implementations should impose a timeout and surface it as
    /// [`GenerationError::Timeout`]; the caller treats a timeout like any
    /// other backend failure.
    async fn generate(&self, request: AnswerRequest) -> Result<String, GenerationError>;
}

/// Who produced a history turn handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A prior conversation turn, provided for answer continuity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: TurnRole,
    pub content: String,
}

impl HistoryTurn {
    /// Creates a new history turn.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Request for a generated answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRequest {
    /// The full prompt, including any retrieved context.
    pub prompt: String,
    /// Recent conversation turns, oldest first.
    pub history: Vec<HistoryTurn>,
}

impl AnswerRequest {
    /// Creates a request with no history.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
        }
    }

    /// Attaches conversation history.
    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Failures of the generative backend.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Generative backend unavailable: {0}")]
    Unavailable(String),

    #[error("Generative backend returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Generative request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}
