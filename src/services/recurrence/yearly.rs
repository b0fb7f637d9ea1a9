use std::collections::BTreeSet;

use chrono::Datelike;
use chrono_tz::Tz;

use crate::models::repeating::{DayOfWeek, WeekOrdinal};
use crate::utils::date::{resolve_local, zoned};

use super::utils::{by_week_days, clamped_day};

// Every configured month resolves at least one ordinal pair, so stepped
// years only fail on DST gaps; a few steps of slack covers those.
const MAX_YEAR_STEPS: u32 = 4;

/// Month-ordinal search nested in a year cadence: the rest of the current
/// year's configured months first (the current month contributes only
/// candidates strictly after `from`), then interval-stepped years.
pub(super) fn next_start(
    from_seconds: i64,
    zone: Tz,
    interval: u32,
    months: &BTreeSet<u32>,
    ordinals: &BTreeSet<WeekOrdinal>,
    weekdays: &BTreeSet<DayOfWeek>,
) -> Option<i64> {
    let local = zoned(from_seconds, zone);
    let time = local.time();
    let from_date = local.date_naive();
    let mut year = from_date.year();

    for &month in months.iter().filter(|&&month| month >= from_date.month()) {
        for date in by_week_days(year, month, ordinals, weekdays) {
            if date <= from_date {
                continue;
            }
            if let Some(resolved) = resolve_local(date, time, zone) {
                if resolved.timestamp() > from_seconds {
                    return Some(resolved.timestamp());
                }
            }
        }
    }

    for _ in 0..MAX_YEAR_STEPS {
        year += interval as i32;
        for &month in months {
            for date in by_week_days(year, month, ordinals, weekdays) {
                if let Some(resolved) = resolve_local(date, time, zone) {
                    if resolved.timestamp() > from_seconds {
                        return Some(resolved.timestamp());
                    }
                }
            }
        }
    }
    None
}

/// Fixed month/day anniversary: this year's anchor if it is still ahead of
/// `from`, otherwise the anchor `interval` years on, clamping the day when
/// the target month is shorter (Feb 29 -> Feb 28).
pub(super) fn fixed_day_next_start(
    from_seconds: i64,
    zone: Tz,
    interval: u32,
    month: u32,
    day: u32,
) -> Option<i64> {
    let local = zoned(from_seconds, zone);
    let time = local.time();
    let from_date = local.date_naive();

    if let Some(date) = clamped_day(from_date.year(), month, day) {
        if date > from_date {
            if let Some(resolved) = resolve_local(date, time, zone) {
                if resolved.timestamp() > from_seconds {
                    return Some(resolved.timestamp());
                }
            }
        }
    }

    let mut year = from_date.year();
    for _ in 0..MAX_YEAR_STEPS {
        year += interval as i32;
        if let Some(date) = clamped_day(year, month, day) {
            if let Some(resolved) = resolve_local(date, time, zone) {
                if resolved.timestamp() > from_seconds {
                    return Some(resolved.timestamp());
                }
            }
        }
    }
    None
}
