//! In-memory session store.
//!
//! The default backing for single-process deployments. The outer map is
//! guarded by an RwLock held only long enough to clone a handle; turn
//! processing locks the per-session mutex inside the handle, so one
//! session's turns serialize while distinct sessions run in parallel.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::dialogue::DialogueSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionHandle, SessionStore, StoreError};

/// Map-backed session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: DialogueSession) -> Result<SessionHandle, StoreError> {
        let id = *session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        let handle: SessionHandle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, StoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::FieldKey;

    fn session() -> DialogueSession {
        DialogueSession::new(SessionId::new(), vec![FieldKey::Department]).unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_state() {
        let store = InMemorySessionStore::new();
        let session = session();
        let id = *session.id();

        store.insert(session).await.unwrap();
        let handle = store.get(&id).await.unwrap().expect("session exists");
        assert_eq!(*handle.lock().await.id(), id);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemorySessionStore::new();
        let session = session();
        let duplicate = session.clone();

        store.insert(session).await.unwrap();
        assert!(matches!(
            store.insert(duplicate).await,
            Err(StoreError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn remove_reports_existence() {
        let store = InMemorySessionStore::new();
        let session = session();
        let id = *session.id();

        store.insert(session).await.unwrap();
        assert!(store.remove(&id).await.unwrap());
        assert!(!store.remove(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mutations_through_handle_are_visible_to_later_gets() {
        let store = InMemorySessionStore::new();
        let session = session();
        let id = *session.id();

        let handle = store.insert(session).await.unwrap();
        handle.lock().await.fill(FieldKey::Department, "개발팀");

        let again = store.get(&id).await.unwrap().unwrap();
        assert!(again.lock().await.is_complete());
    }
}
