//! Reward ledger on top of the audit log.
//!
//! There is no per-day check-in table. "Checked in on day D" means a `Sign`
//! record exists whose `created_at` lies in D's inclusive bounds, so the day
//! bounds and the audit timestamp must come from the same clock sample.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use checkin_shared::CheckinConfig;
use checkin_shared::types::UserId;
use tracing::{error, warn};

use super::clock::{DayBounds, local_date};
use super::error::CheckinError;
use super::quota::format_quota;
use super::store::{AuditLog, UserStore};
use super::types::{AuditKind, NewAuditRecord, TimeRange};

/// Reads and writes check-in facts through the user and audit stores.
pub struct RewardLedger<U, A> {
    users: Arc<U>,
    audit: Arc<A>,
}

impl<U: UserStore, A: AuditLog> RewardLedger<U, A> {
    /// Creates a ledger over the given stores.
    #[must_use]
    pub fn new(users: Arc<U>, audit: Arc<A>) -> Self {
        Self { users, audit }
    }

    /// Returns true if the user has a `Sign` record within `today`.
    pub async fn has_signed_today(
        &self,
        user_id: UserId,
        today: DayBounds,
    ) -> Result<bool, CheckinError> {
        let range = TimeRange {
            start: today.start,
            end: today.end,
        };
        let count = self
            .audit
            .count_records(user_id, AuditKind::Sign, Some(range))
            .await?;
        Ok(count > 0)
    }

    /// Lifetime number of `Sign` records for the user.
    pub async fn total_sign_days(&self, user_id: UserId) -> Result<u64, CheckinError> {
        self.audit
            .count_records(user_id, AuditKind::Sign, None)
            .await
    }

    /// Local dates on which the user checked in.
    pub async fn signed_dates(
        &self,
        user_id: UserId,
        tz: Tz,
    ) -> Result<HashSet<NaiveDate>, CheckinError> {
        let records = self.audit.find_records(user_id, AuditKind::Sign).await?;
        Ok(records
            .iter()
            .filter_map(|r| local_date(r.created_at, tz))
            .collect())
    }

    /// Credits `quota` to the user and records the check-in.
    ///
    /// The balance increase and the audit append are separate writes. Only a
    /// failed balance increase fails the call. A failed audit append after a
    /// successful increase is logged and swallowed: the user keeps the
    /// reward and the audit trail is short one entry until reconciled.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::QuotaIncrease` if the balance was not changed.
    pub async fn credit(
        &self,
        user_id: UserId,
        quota: i64,
        at: i64,
        config: &CheckinConfig,
    ) -> Result<(), CheckinError> {
        let username = match self.users.find_username(user_id).await {
            Ok(name) => name.unwrap_or_default(),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Failed to resolve username for check-in");
                String::new()
            }
        };

        self.users
            .increase_quota(user_id, quota)
            .await
            .map_err(|e| CheckinError::QuotaIncrease {
                user_id,
                message: e.to_string(),
            })?;

        let record = NewAuditRecord {
            user_id,
            username,
            kind: AuditKind::Sign,
            content: format!("Daily check-in reward {}", format_quota(quota, config)),
            quota,
            created_at: at,
        };

        if let Err(e) = self.audit.append_record(record).await {
            error!(
                user_id = %user_id,
                quota,
                error = %e,
                "Failed to record check-in audit entry; quota was already granted"
            );
        }

        Ok(())
    }
}
