//! Per-story generation locking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Hands out one async lock per story so that concurrent first views of the
/// same story run world-building generation once.
///
/// Locks are kept for the lifetime of the process, like the stories they
/// guard.
#[derive(Debug, Default)]
pub struct GenerationLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl GenerationLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive generation rights on `story_id`.
    pub async fn acquire(&self, story_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(story_id).or_default())
        };
        lock.lock_owned().await
    }
}
