//! Optional per-document mutual exclusion

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// One async mutex per document name, created on first use and dropped
/// once nobody holds or waits for it
#[derive(Debug, Default, Clone)]
pub struct DocumentLocks {
    locks: Arc<LockTable>,
}

/// Exclusive access to one document
#[derive(Debug)]
pub struct DocumentGuard {
    name: String,
    locks: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for DocumentGuard {
    fn drop(&mut self) {
        // Release the mutex first so its Arc no longer counts as held
        self.guard.take();
        self.locks
            .remove_if(&self.name, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl DocumentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `name`; released when the guard drops
    pub async fn acquire(&self, name: &str) -> DocumentGuard {
        // Clone the Arc out so the shard lock is not held across the await
        let lock = self
            .locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        DocumentGuard {
            name: name.to_string(),
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of documents currently locked or waited on
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
