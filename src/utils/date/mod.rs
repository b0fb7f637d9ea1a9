// Date utility functions
// Timezone-aware calendar-field helpers shared by the recurrence modules

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// View an epoch-second instant through a timezone
pub fn zoned(seconds: i64, zone: Tz) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&zone)
}

/// Resolve a local calendar date + wall-clock time to an instant in `zone`.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant;
/// nonexistent local times (DST spring-forward gap) resolve to `None` and
/// the caller skips the candidate.
pub fn resolve_local(date: NaiveDate, time: NaiveTime, zone: Tz) -> Option<DateTime<Tz>> {
    zone.from_local_datetime(&date.and_time(time)).earliest()
}

/// Number of days in a calendar month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = add_months(year, month, 1);
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 0,
    }
}

/// Step a (year, month) pair forward by a number of months, normalizing
/// across year boundaries
pub fn add_months(year: i32, month: u32, delta: u32) -> (i32, u32) {
    let zero_based = (month as i64 - 1) + delta as i64;
    let year = year + (zero_based / 12) as i32;
    let month = (zero_based % 12 + 1) as u32;
    (year, month)
}

/// First day of the week containing `date`; weeks start on Sunday
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_sunday() as i64)
}
