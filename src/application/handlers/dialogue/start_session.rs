//! StartSession command handler.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::catalog::FieldKey;
use crate::domain::dialogue::{DialogueSession, HistoryRole, ResponseComposer};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Command to open a new dialogue session.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand {
    /// Fields to collect, in order. `None` uses the full job-posting set.
    pub fields: Option<Vec<FieldKey>>,
}

/// Result of opening a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub first_prompt: String,
    pub first_field: FieldKey,
    pub suggestions: Vec<String>,
}

/// Errors when opening a session.
#[derive(Debug, Clone, Error)]
pub enum StartSessionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage backend failure: {0}")]
    Storage(String),
}

/// Handler for session creation.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
    composer: ResponseComposer,
}

impl StartSessionHandler {
    /// Creates a new handler.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            composer: ResponseComposer::new(),
        }
    }

    /// Opens a session and returns the opening prompt.
    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, StartSessionError> {
        let fields = cmd.fields.unwrap_or_else(|| FieldKey::ALL.to_vec());

        let mut session = DialogueSession::new(SessionId::new(), fields)
            .map_err(|err| StartSessionError::Validation(err.to_string()))?;

        let first_field = session
            .current_field()
            .expect("new sessions have at least one field");
        let first_prompt = self.composer.greeting(first_field);
        session.append_history(HistoryRole::Assistant, &first_prompt, Some(first_field));

        let session_id = *session.id();
        self.store
            .insert(session)
            .await
            .map_err(|err| StartSessionError::Storage(err.to_string()))?;

        info!(%session_id, first_field = %first_field, "session started");

        Ok(StartSessionResult {
            session_id,
            first_prompt,
            first_field,
            suggestions: self.composer.suggestions_for(first_field),
        })
    }
}
