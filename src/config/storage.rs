//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Which session store adapter to wire
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the file backend
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl StorageConfig {
    /// Directory for one kind of session under the root
    pub fn directory_for(&self, kind: &str) -> PathBuf {
        self.directory.join(kind)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("data/sessions")
}
