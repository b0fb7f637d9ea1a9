use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::models::repeating::MonthlySelection;
use crate::utils::date::{add_months, resolve_local, zoned};

use super::utils::{by_week_days, month_days};

// A day-of-month selection can be unsatisfiable in every stepped month
// (day 31 with a 12-month interval anchored to a 30-day month). The walk
// stops after this many stepped months and reports no next occurrence.
const MAX_MONTH_STEPS: u32 = 48;

/// Same month first: the smallest candidate day strictly after `from`'s
/// day wins. Otherwise step the month by `interval` and take the earliest
/// valid candidate, skipping months that have none.
pub(super) fn next_start(
    from_seconds: i64,
    zone: Tz,
    interval: u32,
    selection: &MonthlySelection,
) -> Option<i64> {
    let local = zoned(from_seconds, zone);
    let time = local.time();
    let from_date = local.date_naive();
    let (mut year, mut month) = (from_date.year(), from_date.month());

    for date in candidates(year, month, selection) {
        if date <= from_date {
            continue;
        }
        if let Some(resolved) = resolve_local(date, time, zone) {
            if resolved.timestamp() > from_seconds {
                return Some(resolved.timestamp());
            }
        }
    }

    for _ in 0..MAX_MONTH_STEPS {
        let stepped = add_months(year, month, interval);
        year = stepped.0;
        month = stepped.1;
        for date in candidates(year, month, selection) {
            if let Some(resolved) = resolve_local(date, time, zone) {
                if resolved.timestamp() > from_seconds {
                    return Some(resolved.timestamp());
                }
            }
        }
    }

    log::debug!(
        "no valid day of month within {} stepped months from {}",
        MAX_MONTH_STEPS,
        from_date
    );
    None
}

fn candidates(year: i32, month: u32, selection: &MonthlySelection) -> Vec<NaiveDate> {
    match selection {
        MonthlySelection::ByDaysOfMonth(days) => month_days(year, month, days),
        MonthlySelection::ByWeek { ordinals, weekdays } => {
            by_week_days(year, month, ordinals, weekdays)
        }
    }
}
