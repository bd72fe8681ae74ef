//! Session Store Port - Interface for keeping session aggregates between
//! requests.
//!
//! The controller depends on this port only, so the in-memory map used in
//! development can be swapped for file or database storage.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for reading and writing one kind of session aggregate.
#[async_trait]
pub trait SessionStore<S>: Send + Sync
where
    S: Send + Sync + 'static,
{
    /// Load a session, `None` when the id is unknown.
    async fn get(&self, id: SessionId) -> Result<Option<S>, StoreError>;

    /// Insert or replace a session.
    async fn put(&self, id: SessionId, session: &S) -> Result<(), StoreError>;

    /// Remove a session.
    ///
    /// # Returns
    /// `true` if something was removed. Unknown ids are not an error.
    async fn delete(&self, id: SessionId) -> Result<bool, StoreError>;
}
