//! Calendar and clock matching shared by the admission gate and the
//! reminder scheduler.
//!
//! All comparisons happen in one civil timezone so that "today" and
//! "09:45" mean the same thing regardless of the host clock.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::schedule::Schedule;

/// Civil timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

/// Parses an IANA zone name such as `Asia/Kolkata`.
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| format!("unknown timezone {name:?}: {e}"))
}

pub fn civil_now(tz: Tz, instant: DateTime<Utc>) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

/// Day-of-week index as stored on schedules: 0 = Sunday … 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Whether a schedule has an occurrence on `date`. An explicit date wins
/// over the weekly day-of-week, even when both are set.
pub fn applies_on(schedule: &Schedule, date: NaiveDate) -> bool {
    match schedule.date {
        Some(explicit) => explicit == date,
        None => schedule.day_of_week == Some(day_of_week(date)),
    }
}

pub fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Compares two clock times in whole minutes; seconds are ignored.
pub fn within_tolerance(target: NaiveTime, now: NaiveTime, tolerance_minutes: i64) -> bool {
    (minutes_of_day(target) - minutes_of_day(now)).abs() <= tolerance_minutes
}

pub fn has_ended(schedule: &Schedule, now: NaiveTime) -> bool {
    schedule.end_time <= now
}
