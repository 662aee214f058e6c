//! Per-user serialization of the check-then-grant sequence.
//!
//! Two concurrent grants for the same user would otherwise both pass the
//! "already checked in today" count before either audit record is written.
//! Holding the user's lock across eligibility check, balance increase and
//! audit append closes that window within one process. It does not span
//! multiple server instances.

use std::sync::Arc;

use checkin_shared::types::UserId;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Idle lock entries kept before pruning.
const PRUNE_THRESHOLD: usize = 1024;

/// Registry of per-user async mutexes.
#[derive(Debug, Default)]
pub struct GrantLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl GrantLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock of `user_id`.
    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        if self.locks.len() > PRUNE_THRESHOLD {
            self.prune();
        }

        // Clone out of the map so no shard lock is held while waiting.
        let lock = Arc::clone(self.locks.entry(user_id).or_default().value());
        lock.lock_owned().await
    }

    /// Drops entries nobody holds or waits on.
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
