//! Day-by-day check-in calendar.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;

use super::clock::local_date;
use super::types::DayStatus;

/// Days shown before today when no registration time is known.
pub const FALLBACK_DAYS: u64 = 30;

/// First and last calendar date to show.
///
/// Starts at the local registration date (or [`FALLBACK_DAYS`] before today)
/// and ends at today or `start + window_days`, whichever is earlier. The
/// range may be empty (`start > end`).
#[must_use]
pub fn calendar_range(
    created_time: i64,
    today: NaiveDate,
    window_days: i64,
    tz: Tz,
) -> (NaiveDate, NaiveDate) {
    let fallback = || today.checked_sub_days(Days::new(FALLBACK_DAYS)).unwrap_or(today);
    let start = if created_time > 0 {
        local_date(created_time, tz).unwrap_or_else(fallback)
    } else {
        fallback()
    };

    let window = Days::new(u64::try_from(window_days).unwrap_or(0));
    let end = start
        .checked_add_days(window)
        .map_or(today, |cutoff| cutoff.min(today));

    (start, end)
}

/// One entry per date from `start` to `end` inclusive, ascending.
#[must_use]
pub fn build_calendar(
    start: NaiveDate,
    end: NaiveDate,
    signed: &HashSet<NaiveDate>,
) -> Vec<DayStatus> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DayStatus {
            date,
            signed: signed.contains(&date),
        })
        .collect()
}
