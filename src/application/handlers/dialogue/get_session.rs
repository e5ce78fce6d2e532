//! GetSession query handler - read-back of session state.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::catalog::FieldKey;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::SessionStore;

/// Query for one session's state.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Read model of a session.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: SessionId,
    pub ordered_fields: Vec<FieldKey>,
    pub cursor: usize,
    pub current_field: Option<FieldKey>,
    pub filled_fields: Vec<(FieldKey, String)>,
    pub history_len: usize,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Errors when reading a session.
#[derive(Debug, Clone, Error)]
pub enum GetSessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage backend failure: {0}")]
    Storage(String),
}

/// Handler for session read-back.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    /// Creates a new handler.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns the session's current state.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, GetSessionError> {
        let handle = self
            .store
            .get(&query.session_id)
            .await
            .map_err(|err| GetSessionError::Storage(err.to_string()))?
            .ok_or(GetSessionError::NotFound(query.session_id))?;

        let session = handle.lock().await;
        Ok(SessionView {
            session_id: *session.id(),
            ordered_fields: session.ordered_fields().to_vec(),
            cursor: session.cursor(),
            current_field: session.current_field(),
            filled_fields: session.filled_fields().to_vec(),
            history_len: session.history().len(),
            completed: session.is_complete(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        })
    }
}
