//! Store traits for the collaborators the check-in core depends on.
//!
//! These traits are implemented by the db crate to provide actual database
//! operations.

use std::collections::HashSet;

use checkin_shared::CheckinConfig;
use checkin_shared::types::UserId;

use super::error::CheckinError;
use super::types::{AuditKind, AuditRecord, NewAuditRecord, TimeRange, UserSnapshot};

/// User record store.
pub trait UserStore: Send + Sync {
    /// Load a user snapshot.
    fn find_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<UserSnapshot>, CheckinError>> + Send;

    /// Resolve the display name of a user.
    fn find_username(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<String>, CheckinError>> + Send;

    /// Add `amount` to the user's quota balance.
    fn increase_quota(
        &self,
        id: UserId,
        amount: i64,
    ) -> impl std::future::Future<Output = Result<(), CheckinError>> + Send;
}

/// Append-only audit log store.
pub trait AuditLog: Send + Sync {
    /// Count a user's records of `kind`, optionally within an inclusive range.
    fn count_records(
        &self,
        user_id: UserId,
        kind: AuditKind,
        range: Option<TimeRange>,
    ) -> impl std::future::Future<Output = Result<u64, CheckinError>> + Send;

    /// Load all of a user's records of `kind`.
    fn find_records(
        &self,
        user_id: UserId,
        kind: AuditKind,
    ) -> impl std::future::Future<Output = Result<Vec<AuditRecord>, CheckinError>> + Send;

    /// Append a record.
    fn append_record(
        &self,
        record: NewAuditRecord,
    ) -> impl std::future::Future<Output = Result<AuditRecord, CheckinError>> + Send;
}

/// Decides which user groups may check in.
pub trait GroupPolicy: Send + Sync {
    /// Returns true if members of `group` may check in.
    fn is_sign_allowed(&self, group: &str) -> bool;
}

/// Group policy driven by the `disabled_groups` setting.
#[derive(Debug, Clone, Default)]
pub struct ConfigGroupPolicy {
    disabled: HashSet<String>,
}

impl ConfigGroupPolicy {
    /// Builds the policy from check-in configuration.
    #[must_use]
    pub fn from_config(config: &CheckinConfig) -> Self {
        Self {
            disabled: config.disabled_groups.iter().cloned().collect(),
        }
    }
}

impl GroupPolicy for ConfigGroupPolicy {
    fn is_sign_allowed(&self, group: &str) -> bool {
        !self.disabled.contains(group)
    }
}
