//! In-memory stores for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use checkin_shared::types::{AuditRecordId, UserId};

use super::error::CheckinError;
use super::store::{AuditLog, UserStore};
use super::types::{AuditKind, AuditRecord, NewAuditRecord, TimeRange, UserSnapshot};

/// Mock user store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<UserId, (UserSnapshot, String)>>,
    pub fail_lookup: AtomicBool,
    pub fail_username: AtomicBool,
    pub fail_increase: AtomicBool,
}

impl MemoryUserStore {
    pub fn insert(&self, user: UserSnapshot, username: &str) {
        self.users
            .lock()
            .unwrap()
            .insert(user.id, (user, username.to_string()));
    }

    pub fn quota(&self, id: UserId) -> i64 {
        self.users.lock().unwrap()[&id].0.quota
    }
}

impl UserStore for MemoryUserStore {
    async fn find_user(&self, id: UserId) -> Result<Option<UserSnapshot>, CheckinError> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(CheckinError::storage("user store unavailable"));
        }
        Ok(self.users.lock().unwrap().get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_username(&self, id: UserId) -> Result<Option<String>, CheckinError> {
        if self.fail_username.load(Ordering::SeqCst) {
            return Err(CheckinError::storage("username lookup failed"));
        }
        Ok(self.users.lock().unwrap().get(&id).map(|(_, n)| n.clone()))
    }

    async fn increase_quota(&self, id: UserId, amount: i64) -> Result<(), CheckinError> {
        tokio::task::yield_now().await;
        if self.fail_increase.load(Ordering::SeqCst) {
            return Err(CheckinError::storage("update rejected"));
        }
        let mut users = self.users.lock().unwrap();
        let (user, _) = users
            .get_mut(&id)
            .ok_or_else(|| CheckinError::storage("no such user"))?;
        user.quota += amount;
        Ok(())
    }
}

/// Mock audit log.
#[derive(Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
    pub fail_append: AtomicBool,
    pub fail_queries: AtomicBool,
}

impl MemoryAuditLog {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn seed(&self, user_id: UserId, created_at: i64) {
        self.records.lock().unwrap().push(AuditRecord {
            id: AuditRecordId::new(),
            user_id,
            username: String::new(),
            kind: AuditKind::Sign,
            content: "seeded".to_string(),
            quota: 1,
            created_at,
        });
    }

    fn check_queries(&self) -> Result<(), CheckinError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(CheckinError::storage("audit store unavailable"));
        }
        Ok(())
    }
}

impl AuditLog for MemoryAuditLog {
    async fn count_records(
        &self,
        user_id: UserId,
        kind: AuditKind,
        range: Option<TimeRange>,
    ) -> Result<u64, CheckinError> {
        // Let concurrent grants interleave between check and write.
        tokio::task::yield_now().await;
        self.check_queries()?;
        let count = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.kind == kind)
            .filter(|r| range.is_none_or(|t| t.start <= r.created_at && r.created_at <= t.end))
            .count();
        Ok(count as u64)
    }

    async fn find_records(
        &self,
        user_id: UserId,
        kind: AuditKind,
    ) -> Result<Vec<AuditRecord>, CheckinError> {
        self.check_queries()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.kind == kind)
            .cloned()
            .collect())
    }

    async fn append_record(&self, record: NewAuditRecord) -> Result<AuditRecord, CheckinError> {
        tokio::task::yield_now().await;
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(CheckinError::storage("log write failed"));
        }
        let stored = AuditRecord {
            id: AuditRecordId::new(),
            user_id: record.user_id,
            username: record.username,
            kind: record.kind,
            content: record.content,
            quota: record.quota,
            created_at: record.created_at,
        };
        self.records.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}
