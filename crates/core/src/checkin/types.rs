//! Check-in domain types.
//!
//! The user record and the audit log are owned by external stores; the
//! check-in core only reads snapshots of the former and appends to the
//! latter.

use chrono::NaiveDate;
use checkin_shared::types::{AuditRecordId, UserId};
use serde::{Deserialize, Serialize};

use super::eligibility::IneligibleReason;

/// Read-only view of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    /// User ID.
    pub id: UserId,
    /// Group label, checked against the group policy.
    pub group: String,
    /// Registration time in epoch seconds. `<= 0` means none was recorded.
    pub created_time: i64,
    /// Current quota balance.
    pub quota: i64,
}

impl UserSnapshot {
    /// Returns true if a registration time was recorded.
    #[must_use]
    pub const fn has_registration(&self) -> bool {
        self.created_time > 0
    }
}

/// Kind discriminator of an audit record.
///
/// The log store is shared with other features; check-in only ever creates
/// and queries `Sign` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// Daily check-in reward.
    Sign,
}

impl AuditKind {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sign => "sign",
        }
    }

    /// Parses the stored representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sign" => Some(Self::Sign),
            _ => None,
        }
    }
}

/// An audit log entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    /// Record ID.
    pub id: AuditRecordId,
    /// User the entry belongs to.
    pub user_id: UserId,
    /// Display name at the time of writing. Empty if it could not be resolved.
    pub username: String,
    /// Kind discriminator.
    pub kind: AuditKind,
    /// Human-readable summary.
    pub content: String,
    /// Quota delta.
    pub quota: i64,
    /// Creation time in epoch seconds.
    pub created_at: i64,
}

/// An audit log entry to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditRecord {
    /// User the entry belongs to.
    pub user_id: UserId,
    /// Display name, possibly empty.
    pub username: String,
    /// Kind discriminator.
    pub kind: AuditKind,
    /// Human-readable summary.
    pub content: String,
    /// Quota delta.
    pub quota: i64,
    /// Creation time in epoch seconds.
    pub created_at: i64,
}

/// Inclusive epoch-second range for audit queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// First second included.
    pub start: i64,
    /// Last second included.
    pub end: i64,
}

/// Signed/unsigned status of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatus {
    /// Local calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Whether a check-in was recorded on that date.
    pub signed: bool,
}

/// Outcome of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignResult {
    /// Whether quota was granted.
    pub success: bool,
    /// Message for the user.
    pub message: String,
    /// Quota granted, 0 when rejected.
    pub quota: i64,
    /// Why the attempt was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibleReason>,
}

impl SignResult {
    /// Successful grant of `quota`.
    #[must_use]
    pub fn granted(quota: i64, message: String) -> Self {
        Self {
            success: true,
            message,
            quota,
            reason: None,
        }
    }

    /// Rejected attempt.
    #[must_use]
    pub fn rejected(reason: IneligibleReason) -> Self {
        Self {
            success: false,
            message: reason.message(),
            quota: 0,
            reason: Some(reason),
        }
    }
}

/// Aggregated check-in view for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignInfo {
    /// Whether check-in is switched on.
    pub enabled: bool,
    /// Quota granted per check-in.
    pub quota_per_sign: i64,
    /// Eligibility window in days.
    pub sign_in_days: i64,
    /// Whether the user already checked in today.
    pub signed_today: bool,
    /// Whether a check-in right now would be accepted.
    pub can_sign: bool,
    /// Reason the user cannot check in, empty otherwise.
    pub message: String,
    /// Days left in the eligibility window, never negative.
    pub remaining_days: i64,
    /// Lifetime number of check-ins.
    pub total_sign_days: u64,
    /// Day-by-day calendar.
    pub sign_list: Vec<DayStatus>,
}
