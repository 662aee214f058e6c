//! Check-in service.
//!
//! Composes the eligibility policy, reward ledger and calendar over injected
//! stores. All configuration is passed in at construction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use checkin_shared::CheckinConfig;
use checkin_shared::types::UserId;
use tracing::{debug, info, warn};

use super::calendar::{build_calendar, calendar_range};
use super::clock::{Clock, DayBounds, today};
use super::eligibility::{Eligibility, EligibilityPolicy, IneligibleReason};
use super::error::CheckinError;
use super::ledger::RewardLedger;
use super::locks::GrantLocks;
use super::quota::format_quota;
use super::store::{AuditLog, GroupPolicy, UserStore};
use super::types::{DayStatus, SignInfo, SignResult, UserSnapshot};

/// Daily check-in service.
pub struct CheckinService<U, A, G> {
    config: CheckinConfig,
    users: Arc<U>,
    ledger: RewardLedger<U, A>,
    groups: G,
    clock: Arc<dyn Clock>,
    locks: GrantLocks,
}

impl<U: UserStore, A: AuditLog, G: GroupPolicy> CheckinService<U, A, G> {
    /// Create a new check-in service.
    #[must_use]
    pub fn new(
        config: CheckinConfig,
        users: Arc<U>,
        audit: Arc<A>,
        groups: G,
        clock: Arc<dyn Clock>,
    ) -> Self {
        if config.min_quota != config.max_quota {
            debug!(
                min_quota = config.min_quota,
                max_quota = config.max_quota,
                quota_per_sign = config.quota_per_sign,
                "Reward range is configured but grants use the fixed quota_per_sign"
            );
        }

        Self {
            ledger: RewardLedger::new(Arc::clone(&users), audit),
            config,
            users,
            groups,
            clock,
            locks: GrantLocks::new(),
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CheckinConfig {
        &self.config
    }

    /// Decides whether the user may check in right now.
    ///
    /// A missing or unreadable user record is reported as
    /// `UserLookupFailed`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::Storage` if today's status cannot be queried.
    pub async fn check_eligibility(&self, user_id: UserId) -> Result<Eligibility, CheckinError> {
        self.check_eligibility_at(user_id, self.clock.now()).await
    }

    async fn check_eligibility_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Eligibility, CheckinError> {
        if !self.config.is_enabled() {
            return Ok(Eligibility::Ineligible(IneligibleReason::FeatureDisabled));
        }

        let user = match self.users.find_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Ok(Eligibility::Ineligible(IneligibleReason::UserLookupFailed));
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "User lookup failed during eligibility check");
                return Ok(Eligibility::Ineligible(IneligibleReason::UserLookupFailed));
            }
        };

        let account = EligibilityPolicy::check_account(
            &self.config,
            &user,
            self.groups.is_sign_allowed(&user.group),
            now.timestamp(),
        );
        if let Some(reason) = account {
            return Ok(Eligibility::Ineligible(reason));
        }

        let signed_today = self
            .ledger
            .has_signed_today(user_id, DayBounds::today(now, self.config.timezone))
            .await?;

        Ok(EligibilityPolicy::conclude(None, signed_today))
    }

    /// Claims today's reward.
    ///
    /// Ineligibility is returned as an unsuccessful [`SignResult`], never as
    /// an error. Grants for the same user are serialized, so at most one
    /// succeeds per user per day.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::QuotaIncrease` if the balance could not be
    /// increased, or `CheckinError::Storage` if today's status could not be
    /// queried.
    pub async fn grant(&self, user_id: UserId) -> Result<SignResult, CheckinError> {
        let _guard = self.locks.acquire(user_id).await;
        let now = self.clock.now();

        if let Eligibility::Ineligible(reason) = self.check_eligibility_at(user_id, now).await? {
            debug!(user_id = %user_id, reason = reason.code(), "Check-in rejected");
            return Ok(SignResult::rejected(reason));
        }

        let quota = self.config.quota_per_sign;
        self.ledger
            .credit(user_id, quota, now.timestamp(), &self.config)
            .await?;

        info!(user_id = %user_id, quota, "Check-in reward granted");

        Ok(SignResult::granted(
            quota,
            format!(
                "Check-in succeeded, received {}",
                format_quota(quota, &self.config)
            ),
        ))
    }

    /// Day-by-day calendar from registration to the earlier of today or the
    /// end of the window.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::UserNotFound` or `CheckinError::Storage`.
    pub async fn list_calendar(&self, user_id: UserId) -> Result<Vec<DayStatus>, CheckinError> {
        let user = self.load_user(user_id).await?;
        self.calendar_for(&user, self.clock.now()).await
    }

    async fn calendar_for(
        &self,
        user: &UserSnapshot,
        now: DateTime<Utc>,
    ) -> Result<Vec<DayStatus>, CheckinError> {
        let tz = self.config.timezone;
        let (start, end) =
            calendar_range(user.created_time, today(now, tz), self.config.sign_in_days, tz);
        if start > end {
            return Ok(Vec::new());
        }

        let signed = self.ledger.signed_dates(user.id, tz).await?;
        Ok(build_calendar(start, end, &signed))
    }

    /// Everything the check-in page shows, in one read.
    ///
    /// When the feature is off no user data is read. A disallowed group or a
    /// missing registration time returns early with the message set.
    ///
    /// # Errors
    ///
    /// Returns `CheckinError::UserNotFound` or `CheckinError::Storage`.
    pub async fn info_view(&self, user_id: UserId) -> Result<SignInfo, CheckinError> {
        let mut info = SignInfo {
            enabled: self.config.is_enabled(),
            quota_per_sign: self.config.quota_per_sign,
            sign_in_days: self.config.sign_in_days,
            ..SignInfo::default()
        };

        if !info.enabled {
            info.message = IneligibleReason::FeatureDisabled.message();
            return Ok(info);
        }

        let now = self.clock.now();
        let now_ts = now.timestamp();
        let user = self.load_user(user_id).await?;

        let account = EligibilityPolicy::check_account(
            &self.config,
            &user,
            self.groups.is_sign_allowed(&user.group),
            now_ts,
        );
        if let Some(
            reason @ (IneligibleReason::GroupNotAllowed | IneligibleReason::NoRegistrationRecord),
        ) = account
        {
            info.message = reason.message();
            return Ok(info);
        }

        info.remaining_days = EligibilityPolicy::remaining_days(&self.config, &user, now_ts);
        info.total_sign_days = self.ledger.total_sign_days(user_id).await?;
        info.signed_today = self
            .ledger
            .has_signed_today(user_id, DayBounds::today(now, self.config.timezone))
            .await?;
        info.sign_list = self.calendar_for(&user, now).await?;

        let eligibility = EligibilityPolicy::conclude(account, info.signed_today);
        info.can_sign = eligibility.is_eligible();
        info.message = eligibility.message();

        Ok(info)
    }

    async fn load_user(&self, user_id: UserId) -> Result<UserSnapshot, CheckinError> {
        self.users
            .find_user(user_id)
            .await?
            .ok_or(CheckinError::UserNotFound(user_id))
    }
}
