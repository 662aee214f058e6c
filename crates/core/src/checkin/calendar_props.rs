//! Property-based tests for the check-in calendar.

use std::collections::HashSet;

use chrono::{Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;

use super::calendar::{build_calendar, calendar_range};

/// Strategy to generate a date between 2020 and roughly 2035.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..5000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// One entry per day in the inclusive range, or none when it is empty.
    #[test]
    fn prop_calendar_length(start in date_strategy(), end in date_strategy()) {
        let calendar = build_calendar(start, end, &HashSet::new());

        let expected = if start > end {
            0
        } else {
            usize::try_from((end - start).num_days() + 1).unwrap()
        };
        prop_assert_eq!(calendar.len(), expected);
    }

    /// Dates ascend by exactly one day.
    #[test]
    fn prop_calendar_ascending(start in date_strategy(), span in 0u64..120) {
        let end = start.checked_add_days(Days::new(span)).unwrap();
        let calendar = build_calendar(start, end, &HashSet::new());

        prop_assert_eq!(calendar.first().map(|d| d.date), Some(start));
        prop_assert_eq!(calendar.last().map(|d| d.date), Some(end));
        for pair in calendar.windows(2) {
            prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    /// A day is flagged signed exactly when its date was recorded.
    #[test]
    fn prop_signed_flags_round_trip(
        start in date_strategy(),
        span in 0u64..60,
        picks in prop::collection::vec(0u64..90, 0..20),
    ) {
        let end = start.checked_add_days(Days::new(span)).unwrap();
        let signed: HashSet<NaiveDate> = picks
            .iter()
            .map(|offset| start.checked_add_days(Days::new(*offset)).unwrap())
            .collect();

        let calendar = build_calendar(start, end, &signed);

        for day in &calendar {
            prop_assert_eq!(day.signed, signed.contains(&day.date));
        }
        let flagged = calendar.iter().filter(|d| d.signed).count();
        let in_range = signed.iter().filter(|d| **d >= start && **d <= end).count();
        prop_assert_eq!(flagged, in_range);
    }

    /// The range never ends after today nor past the window.
    #[test]
    fn prop_range_bounded(
        today in date_strategy(),
        registered_ago in -5i64..90,
        window in 0i64..60,
    ) {
        let created = Utc
            .from_utc_datetime(&today.and_hms_opt(12, 0, 0).unwrap())
            .timestamp()
            - registered_ago * 86_400;

        let (start, end) = calendar_range(created, today, window, Tz::UTC);

        prop_assert!(end <= today);
        prop_assert!((end - start).num_days() <= window);
        if registered_ago < 0 {
            prop_assert!(start > end);
        } else {
            prop_assert!(start <= end);
        }
    }
}
