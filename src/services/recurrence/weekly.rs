use std::collections::BTreeSet;

use chrono::{Datelike, Duration};
use chrono_tz::Tz;

use crate::models::repeating::DayOfWeek;
use crate::utils::date::{resolve_local, week_start, zoned};

// A DST gap can swallow a candidate's wall-clock time; a handful of extra
// stepped weeks is enough to walk past any gap.
const MAX_WEEK_STEPS: u32 = 8;

/// Weeks are indexed from the week containing `from` (index 0); valid
/// weeks are the non-negative multiples of `interval`. The rest of week 0
/// is searched first, then the walk jumps whole intervals.
pub(super) fn next_start(
    from_seconds: i64,
    zone: Tz,
    interval: u32,
    weekdays: &BTreeSet<DayOfWeek>,
) -> Option<i64> {
    let local = zoned(from_seconds, zone);
    let time = local.time();
    let from_date = local.date_naive();
    let from_number = DayOfWeek::from_chrono(from_date.weekday()).number();
    let week = week_start(from_date);

    // Selected weekdays later in the same week
    for weekday in weekdays {
        if weekday.number() <= from_number {
            continue;
        }
        let date = week + Duration::days(i64::from(weekday.number()) - 1);
        if let Some(resolved) = resolve_local(date, time, zone) {
            if resolved.timestamp() > from_seconds {
                return Some(resolved.timestamp());
            }
        }
    }

    // Interval-stepped weeks, earliest selected weekday first
    let mut week = week + Duration::weeks(i64::from(interval));
    for _ in 0..MAX_WEEK_STEPS {
        for weekday in weekdays {
            let date = week + Duration::days(i64::from(weekday.number()) - 1);
            if let Some(resolved) = resolve_local(date, time, zone) {
                if resolved.timestamp() > from_seconds {
                    return Some(resolved.timestamp());
                }
            }
        }
        week = week + Duration::weeks(i64::from(interval));
    }
    None
}
