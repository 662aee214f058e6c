//! Clock and calendar-day helpers.
//!
//! Day boundaries are computed in the configured timezone. Every operation
//! samples the clock once and derives all of its day math from that instant.

use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Seconds in one day, used for the registration-age calculation.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Inclusive epoch-second bounds of one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    /// Local midnight.
    pub start: i64,
    /// Last whole second of the day.
    pub end: i64,
}

impl DayBounds {
    /// Bounds of the local day containing `now`.
    #[must_use]
    pub fn today(now: DateTime<Utc>, tz: Tz) -> Self {
        Self::of(today(now, tz), tz)
    }

    /// Bounds of `date` in `tz`.
    ///
    /// `end` is one second before the next local midnight, so a record
    /// stamped exactly on either bound belongs to this day.
    #[must_use]
    pub fn of(date: NaiveDate, tz: Tz) -> Self {
        let start = local_midnight(date, tz);
        let end = date
            .succ_opt()
            .map_or(start + SECONDS_PER_DAY - 1, |next| local_midnight(next, tz) - 1);
        Self { start, end }
    }

    /// Returns true if `ts` falls within the bounds.
    #[must_use]
    pub const fn contains(&self, ts: i64) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Local calendar date of `now`.
#[must_use]
pub fn today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Local calendar date of an epoch second, or `None` if it is out of range.
#[must_use]
pub fn local_date(ts: i64, tz: Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&tz).date_naive())
}

/// Epoch second of local midnight on `date`.
///
/// Zones that skip midnight for DST start the day at the first valid local
/// time after it.
fn local_midnight(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .map_or_else(|| naive.and_utc().timestamp(), |dt| dt.timestamp())
}
