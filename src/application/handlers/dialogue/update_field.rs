//! UpdateField command handler - direct field override from the form UI.
//!
//! Bypasses the classifier: the user edited a field directly, so the value
//! is taken as-is and the cursor stays where it is.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::catalog::FieldKey;
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Command to override one field's value.
#[derive(Debug, Clone)]
pub struct UpdateFieldCommand {
    pub session_id: SessionId,
    pub field: FieldKey,
    pub value: String,
}

/// Errors when overriding a field.
#[derive(Debug, Clone, Error)]
pub enum UpdateFieldError {
    #[error("Validation error: value cannot be empty")]
    EmptyValue,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Storage backend failure: {0}")]
    Storage(String),
}

/// Handler for direct field updates.
pub struct UpdateFieldHandler {
    store: Arc<dyn SessionStore>,
}

impl UpdateFieldHandler {
    /// Creates a new handler.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Overrides the field value without moving the cursor.
    pub async fn handle(&self, cmd: UpdateFieldCommand) -> Result<(), UpdateFieldError> {
        let value = cmd.value.trim();
        if value.is_empty() {
            return Err(UpdateFieldError::EmptyValue);
        }

        let handle = self
            .store
            .get(&cmd.session_id)
            .await
            .map_err(|err| UpdateFieldError::Storage(err.to_string()))?
            .ok_or(UpdateFieldError::SessionNotFound(cmd.session_id))?;

        let mut session = handle.lock().await;
        session.override_value(cmd.field, value.to_string());
        debug!(session_id = %cmd.session_id, field = %cmd.field, "field overridden");
        Ok(())
    }
}
