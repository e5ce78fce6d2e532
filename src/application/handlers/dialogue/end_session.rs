//! EndSession command handler.
//!
//! Completion does not dispose a session; this explicit operation does.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Command to dispose a session.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

/// Result of disposing a session.
#[derive(Debug, Clone)]
pub struct EndSessionResult {
    /// True if the session existed and was removed.
    pub ok: bool,
}

/// Errors when disposing a session.
#[derive(Debug, Clone, Error)]
pub enum EndSessionError {
    #[error("Storage backend failure: {0}")]
    Storage(String),
}

/// Handler for session disposal.
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    /// Creates a new handler.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Removes the session if it exists.
    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<EndSessionResult, EndSessionError> {
        let removed = self
            .store
            .remove(&cmd.session_id)
            .await
            .map_err(|err| EndSessionError::Storage(err.to_string()))?;
        if removed {
            info!(session_id = %cmd.session_id, "session ended");
        }
        Ok(EndSessionResult { ok: removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::catalog::FieldKey;
    use crate::domain::dialogue::DialogueSession;
    use crate::ports::SessionStore as _;

    #[tokio::test]
    async fn ending_existing_session_reports_ok() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = DialogueSession::new(SessionId::new(), vec![FieldKey::Department]).unwrap();
        let id = *session.id();
        store.insert(session).await.unwrap();

        let handler = EndSessionHandler::new(Arc::clone(&store) as Arc<dyn SessionStore>);
        let result = handler.handle(EndSessionCommand { session_id: id }).await.unwrap();
        assert!(result.ok);
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ending_unknown_session_reports_not_ok() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = EndSessionHandler::new(store);
        let result = handler
            .handle(EndSessionCommand {
                session_id: SessionId::new(),
            })
            .await
            .unwrap();
        assert!(!result.ok);
    }
}
