//! Session store port.
//!
//! Sessions are handed out behind a per-session mutex: turns for one
//! session are serialized by locking its handle for the whole turn, while
//! distinct sessions process in parallel. The store itself only maps ids
//! to handles, which keeps in-memory and persistent backings swappable
//! without touching classification logic.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::dialogue::DialogueSession;
use crate::domain::foundation::SessionId;

/// Shared, lockable handle to one session's state.
pub type SessionHandle = Arc<Mutex<DialogueSession>>;

/// Port for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session and returns its handle.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if the session id is already present
    async fn insert(&self, session: DialogueSession) -> Result<SessionHandle, StoreError>;

    /// Looks up a session by id. Returns `None` if not found.
    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, StoreError>;

    /// Removes a session. Returns true if it existed.
    async fn remove(&self, id: &SessionId) -> Result<bool, StoreError>;
}

/// Failures of the session storage backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Session {0} already exists")]
    Duplicate(SessionId),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}
