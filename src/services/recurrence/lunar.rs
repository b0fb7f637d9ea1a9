use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use icu::calendar::cal::Dangi;
use icu::calendar::{Date, Ref};

use crate::utils::date::{resolve_local, zoned};

// Two lunar years of slack: a day-30 anniversary can be absent from the
// nearest lunar year when that year's month runs 29 days.
const MAX_SCAN_DAYS: u32 = 800;

/// Next anniversary of a Korean lunisolar (Dangi) month/day, strictly
/// after `from`. Leap lunar months are skipped; a day-30 target in a
/// 29-day lunar month clamps to the month's final day.
pub(super) fn next_start(from_seconds: i64, zone: Tz, month: u32, day: u32) -> Option<i64> {
    let local = zoned(from_seconds, zone);
    let time = local.time();
    let calendar = Dangi::new();
    let mut cursor = local.date_naive() + Duration::days(1);

    for _ in 0..MAX_SCAN_DAYS {
        if let Some((lunar_month, lunar_day, leap)) = lunar_fields(cursor, &calendar) {
            if !leap && lunar_month == month {
                let clamped = lunar_day < day && is_last_of_lunar_month(cursor, &calendar);
                if lunar_day == day || clamped {
                    if let Some(resolved) = resolve_local(cursor, time, zone) {
                        if resolved.timestamp() > from_seconds {
                            return Some(resolved.timestamp());
                        }
                    }
                }
            }
        }
        cursor = cursor + Duration::days(1);
    }

    log::debug!(
        "no lunar {}/{} anniversary within {} days of {}",
        month,
        day,
        MAX_SCAN_DAYS,
        local.date_naive()
    );
    None
}

/// Lunar (month, day, is-leap-month) of a Gregorian date, with the month
/// taken from the standard month code so leap months keep their parent's
/// number ("M05L" reads as month 5).
fn lunar_fields(date: NaiveDate, calendar: &Dangi) -> Option<(u32, u32, bool)> {
    let iso = Date::try_new_iso(date.year(), date.month() as u8, date.day() as u8).ok()?;
    let lunar = iso.to_calendar(Ref(calendar));
    let code = lunar.month().standard_code.0;
    let code = code.as_str();
    let month: u32 = code.get(1..3)?.parse().ok()?;
    let leap = code.len() > 3;
    let day = u32::from(lunar.day_of_month().0);
    Some((month, day, leap))
}

fn is_last_of_lunar_month(date: NaiveDate, calendar: &Dangi) -> bool {
    let Some((month, _, leap)) = lunar_fields(date, calendar) else {
        return false;
    };
    match lunar_fields(date + Duration::days(1), calendar) {
        Some((next_month, _, next_leap)) => next_month != month || next_leap != leap,
        None => false,
    }
}
