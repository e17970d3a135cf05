//! Per-day locks serialising snapshot creation.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per snapshot day.
///
/// Concurrent triggers for the same day queue behind each other; triggers
/// for different days proceed independently. Entries nobody holds are
/// pruned on the next acquisition.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLocks {
    days: Arc<Mutex<HashMap<DateTime<Utc>, Arc<Mutex<()>>>>>,
}

impl SnapshotLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock for `day`.
    pub async fn acquire(&self, day: DateTime<Utc>) -> OwnedMutexGuard<()> {
        let lock = {
            let mut days = self.days.lock().await;
            days.retain(|key, lock| *key == day || Arc::strong_count(lock) > 1);
            days.entry(day).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of days currently tracked.
    pub async fn tracked(&self) -> usize {
        self.days.lock().await.len()
    }
}
