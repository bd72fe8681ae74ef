//! File-based Session Store Adapter
//!
//! Stores each session as a YAML file on disk, one directory per session id
//! for easy navigation and debugging.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, StoreError};

/// File-based storage for session aggregates
#[derive(Debug)]
pub struct FileSessionStore<S> {
    base_path: PathBuf,
    _session: PhantomData<fn() -> S>,
}

impl<S> FileSessionStore<S> {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::<AssessmentSession>::new("./data/sessions/assessment");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            _session: PhantomData,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn session_dir(&self, id: SessionId) -> PathBuf {
        self.base_path.join(id.to_string())
    }

    fn session_file_path(&self, id: SessionId) -> PathBuf {
        self.session_dir(id).join("session.yaml")
    }
}

impl<S> Clone for FileSessionStore<S> {
    fn clone(&self) -> Self {
        Self::new(&self.base_path)
    }
}

#[async_trait]
impl<S> SessionStore<S> for FileSessionStore<S>
where
    S: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, id: SessionId) -> Result<Option<S>, StoreError> {
        let file_path = self.session_file_path(id);

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };

        let session = serde_yaml::from_str(&yaml)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;
        Ok(Some(session))
    }

    async fn put(&self, id: SessionId, session: &S) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(session)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        fs::create_dir_all(self.session_dir(id))
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        fs::write(self.session_file_path(id), yaml)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<bool, StoreError> {
        match fs::remove_dir_all(self.session_dir(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}
