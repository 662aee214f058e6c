//! Property-based tests for the eligibility rules.

use checkin_shared::CheckinConfig;
use checkin_shared::types::UserId;
use proptest::prelude::*;

use super::clock::SECONDS_PER_DAY;
use super::eligibility::{Eligibility, EligibilityPolicy, IneligibleReason};
use super::types::UserSnapshot;

const NOW: i64 = 1_792_238_400;

fn config(window: i64) -> CheckinConfig {
    CheckinConfig {
        quota_per_sign: 1000,
        sign_in_days: window,
        ..CheckinConfig::default()
    }
}

fn user(created_time: i64) -> UserSnapshot {
    UserSnapshot {
        id: UserId::new(),
        group: "default".to_string(),
        created_time,
        quota: 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Without a registration time nobody is ever eligible.
    #[test]
    fn prop_no_registration_never_eligible(
        window in 0i64..365,
        created in -1_000_000i64..=0,
        signed_today in any::<bool>(),
    ) {
        let account = EligibilityPolicy::check_account(&config(window), &user(created), true, NOW);

        prop_assert_eq!(account, Some(IneligibleReason::NoRegistrationRecord));
        prop_assert!(!EligibilityPolicy::conclude(account, signed_today).is_eligible());
        prop_assert_eq!(EligibilityPolicy::remaining_days(&config(window), &user(created), NOW), 0);
    }

    /// Group denial wins over every other account reason.
    #[test]
    fn prop_group_denial_first(window in 0i64..365, created in -10i64..NOW) {
        let account = EligibilityPolicy::check_account(&config(window), &user(created), false, NOW);
        prop_assert_eq!(account, Some(IneligibleReason::GroupNotAllowed));
    }

    /// Inside the window the verdict depends only on today's status.
    #[test]
    fn prop_window_decides(
        window in 1i64..365,
        days_ago in 0i64..400,
        signed_today in any::<bool>(),
    ) {
        let created = NOW - days_ago * SECONDS_PER_DAY;
        let account = EligibilityPolicy::check_account(&config(window), &user(created), true, NOW);
        let verdict = EligibilityPolicy::conclude(account, signed_today);

        if days_ago >= window {
            prop_assert_eq!(
                verdict,
                Eligibility::Ineligible(IneligibleReason::WindowExpired { window_days: window })
            );
        } else if signed_today {
            prop_assert_eq!(verdict, Eligibility::Ineligible(IneligibleReason::AlreadySignedToday));
        } else {
            prop_assert_eq!(verdict, Eligibility::Eligible);
        }
    }

    /// Remaining days never go negative and shrink as registration ages.
    #[test]
    fn prop_remaining_days_monotonic(window in 0i64..365, days_ago in 0i64..400) {
        let cfg = config(window);
        let created = NOW - days_ago * SECONDS_PER_DAY - 1;
        let today = EligibilityPolicy::remaining_days(&cfg, &user(created), NOW);
        let tomorrow = EligibilityPolicy::remaining_days(&cfg, &user(created), NOW + SECONDS_PER_DAY);

        prop_assert!(today >= 0);
        prop_assert!(tomorrow <= today);
        prop_assert_eq!(today, (window - days_ago).max(0));
    }

    /// Remaining days stay within the window whatever the clock says.
    #[test]
    fn prop_remaining_days_bounded(window in 0i64..365, offset in -400i64..400) {
        let created = NOW + offset * SECONDS_PER_DAY;
        let remaining = EligibilityPolicy::remaining_days(&config(window), &user(created), NOW);

        prop_assert!((0..=window).contains(&remaining));
    }
}
