//! Daily check-in rewards.
//!
//! This module provides business logic for the check-in feature including:
//! - Eligibility evaluation with ordered rejection reasons
//! - Reward grants recorded in the audit log
//! - Calendar and info views for the check-in page
//!
//! Storage is reached through the [`UserStore`] and [`AuditLog`] traits so
//! the rules can be exercised without a database.

pub mod calendar;
pub mod clock;
pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod locks;
pub mod quota;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod memory;
#[cfg(test)]
mod calendar_props;
#[cfg(test)]
mod eligibility_props;

pub use calendar::{build_calendar, calendar_range};
pub use clock::{Clock, DayBounds, FixedClock, SystemClock};
pub use eligibility::{Eligibility, EligibilityPolicy, IneligibleReason};
pub use error::CheckinError;
pub use ledger::RewardLedger;
pub use locks::GrantLocks;
pub use quota::format_quota;
pub use service::CheckinService;
pub use store::{AuditLog, ConfigGroupPolicy, GroupPolicy, UserStore};
pub use types::{
    AuditKind, AuditRecord, DayStatus, NewAuditRecord, SignInfo, SignResult, TimeRange,
    UserSnapshot,
};
