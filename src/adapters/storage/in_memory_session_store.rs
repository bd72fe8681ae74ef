//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a shared map. Sessions live until deleted or until the
//! process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, StoreError};

/// In-memory storage for session aggregates
#[derive(Debug)]
pub struct InMemorySessionStore<S> {
    sessions: Arc<RwLock<HashMap<SessionId, S>>>,
}

impl<S> InMemorySessionStore<S> {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl<S> Clone for InMemorySessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<S> Default for InMemorySessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> SessionStore<S> for InMemorySessionStore<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn get(&self, id: SessionId) -> Result<Option<S>, StoreError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn put(&self, id: SessionId, session: &S) -> Result<(), StoreError> {
        self.sessions.write().await.insert(id, session.clone());
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::AssessmentSession;
    use crate::domain::foundation::UserId;

    fn session() -> AssessmentSession {
        AssessmentSession::new(SessionId::new(), UserId::new("user-1").unwrap(), 3).unwrap()
    }

    #[tokio::test]
    async fn put_then_get_returns_copy() {
        let store: InMemorySessionStore<AssessmentSession> = InMemorySessionStore::new();
        let s = session();
        store.put(s.id(), &s).await.unwrap();

        let loaded = store.get(s.id()).await.unwrap();
        assert_eq!(loaded, Some(s));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_is_none() {
        let store: InMemorySessionStore<AssessmentSession> = InMemorySessionStore::new();
        assert!(store.get(SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store: InMemorySessionStore<AssessmentSession> = InMemorySessionStore::new();
        let s = session();
        store.put(s.id(), &s).await.unwrap();

        assert!(store.delete(s.id()).await.unwrap());
        assert!(!store.delete(s.id()).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_the_same_map() {
        let store: InMemorySessionStore<AssessmentSession> = InMemorySessionStore::new();
        let other = store.clone();
        let s = session();
        store.put(s.id(), &s).await.unwrap();
        assert!(other.get(s.id()).await.unwrap().is_some());

        other.clear().await;
        assert!(store.is_empty().await);
    }
}
