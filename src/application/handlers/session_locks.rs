//! Single-writer-per-session guard.
//!
//! A session id is held while one request mutates it; a second writer on
//! the same id is turned away instead of queued.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::foundation::SessionId;

#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    held: Arc<Mutex<HashSet<SessionId>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn held(&self) -> MutexGuard<'_, HashSet<SessionId>> {
        self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claims `id`, or `None` when another request holds it.
    pub fn try_acquire(&self, id: SessionId) -> Option<SessionGuard> {
        if !self.held().insert(id) {
            return None;
        }
        Some(SessionGuard {
            id,
            held: Arc::clone(&self.held),
        })
    }

    pub fn is_held(&self, id: SessionId) -> bool {
        self.held().contains(&id)
    }
}

/// Releases the session id when dropped.
#[derive(Debug)]
pub struct SessionGuard {
    id: SessionId,
    held: Arc<Mutex<HashSet<SessionId>>>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut held = self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        held.remove(&self.id);
    }
}
