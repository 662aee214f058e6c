//! Check-in eligibility policy.
//!
//! The checks run in a fixed order and stop at the first failure:
//! 1. feature switched off
//! 2. user record unavailable
//! 3. group not allowed
//! 4. no registration time recorded
//! 5. registration older than the window
//! 6. already checked in today
//!
//! Steps 3-5 and the final verdict are pure functions here, so the grant path
//! and the info view reach identical conclusions from identical inputs.

use checkin_shared::CheckinConfig;
use serde::{Serialize, Serializer};

use super::clock::SECONDS_PER_DAY;
use super::types::UserSnapshot;

/// Why a user may not check in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    /// Reward quota is not positive.
    FeatureDisabled,
    /// User record could not be loaded.
    UserLookupFailed,
    /// User's group is excluded by the group policy.
    GroupNotAllowed,
    /// No registration time on record; permanent.
    NoRegistrationRecord,
    /// Registration is older than the window.
    WindowExpired {
        /// Configured window length.
        window_days: i64,
    },
    /// A check-in was already recorded today.
    AlreadySignedToday,
}

impl IneligibleReason {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FeatureDisabled => "FEATURE_DISABLED",
            Self::UserLookupFailed => "USER_LOOKUP_FAILED",
            Self::GroupNotAllowed => "GROUP_NOT_ALLOWED",
            Self::NoRegistrationRecord => "NO_REGISTRATION_RECORD",
            Self::WindowExpired { .. } => "WINDOW_EXPIRED",
            Self::AlreadySignedToday => "ALREADY_SIGNED_TODAY",
        }
    }

    /// Message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::FeatureDisabled => "feature not enabled".to_string(),
            Self::UserLookupFailed => "failed to load user information".to_string(),
            Self::GroupNotAllowed => "your user group is not allowed to check in".to_string(),
            Self::NoRegistrationRecord => {
                "check-in is only available to newly registered users".to_string()
            }
            Self::WindowExpired { window_days } => {
                format!("check-in is only available within {window_days} days of registration")
            }
            Self::AlreadySignedToday => "already checked in today".to_string(),
        }
    }
}

impl Serialize for IneligibleReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Verdict of an eligibility evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// A check-in would be accepted.
    Eligible,
    /// A check-in would be rejected.
    Ineligible(IneligibleReason),
}

impl Eligibility {
    /// Returns true if a check-in would be accepted.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Rejection reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<IneligibleReason> {
        match self {
            Self::Eligible => None,
            Self::Ineligible(reason) => Some(*reason),
        }
    }

    /// Message shown to the user, empty when eligible.
    #[must_use]
    pub fn message(&self) -> String {
        self.reason().map(|r| r.message()).unwrap_or_default()
    }
}

/// Pure eligibility rules.
pub struct EligibilityPolicy;

impl EligibilityPolicy {
    /// Whole days since registration, truncated toward zero.
    #[must_use]
    pub const fn registered_days(now_ts: i64, created_time: i64) -> i64 {
        (now_ts - created_time) / SECONDS_PER_DAY
    }

    /// Days left in the window, within `0..=sign_in_days`.
    ///
    /// A registration time ahead of the clock counts as registered today.
    #[must_use]
    pub fn remaining_days(config: &CheckinConfig, user: &UserSnapshot, now_ts: i64) -> i64 {
        if !user.has_registration() {
            return 0;
        }
        let window = config.sign_in_days.max(0);
        (window - Self::registered_days(now_ts, user.created_time)).clamp(0, window)
    }

    /// Account-level checks (group, registration, window).
    ///
    /// Returns the first failing reason, or `None` if the account may check
    /// in subject to today's status.
    #[must_use]
    pub fn check_account(
        config: &CheckinConfig,
        user: &UserSnapshot,
        group_allowed: bool,
        now_ts: i64,
    ) -> Option<IneligibleReason> {
        if !group_allowed {
            return Some(IneligibleReason::GroupNotAllowed);
        }
        if !user.has_registration() {
            return Some(IneligibleReason::NoRegistrationRecord);
        }
        if Self::registered_days(now_ts, user.created_time) >= config.sign_in_days {
            return Some(IneligibleReason::WindowExpired {
                window_days: config.sign_in_days,
            });
        }
        None
    }

    /// Final verdict from the account checks and today's status.
    #[must_use]
    pub const fn conclude(account: Option<IneligibleReason>, signed_today: bool) -> Eligibility {
        match account {
            Some(reason) => Eligibility::Ineligible(reason),
            None if signed_today => Eligibility::Ineligible(IneligibleReason::AlreadySignedToday),
            None => Eligibility::Eligible,
        }
    }
}
