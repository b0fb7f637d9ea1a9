use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::models::repeating::{DayOfWeek, WeekOrdinal};
use crate::utils::date::days_in_month;

/// Resolve a week ordinal + weekday pair to a concrete day of the month.
/// "1st".."4th" count occurrences of the weekday from day 1 and always
/// exist; "last" is the final occurrence, which may or may not coincide
/// with the 4th.
pub(super) fn resolve_ordinal(
    year: i32,
    month: u32,
    ordinal: WeekOrdinal,
    weekday: DayOfWeek,
) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_weekday = DayOfWeek::from_chrono(first.weekday()).number();
    let offset = (weekday.number() + 7 - first_weekday) % 7;
    let month_length = days_in_month(year, month);

    let day = match ordinal.nth() {
        Some(position) => 1 + offset + (position - 1) * 7,
        None => {
            let mut day = 1 + offset;
            while day + 7 <= month_length {
                day += 7;
            }
            day
        }
    };

    if day > month_length {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// All days a week-ordinal selection resolves to within one month,
/// ascending. Pairs that land on the same day ("4th Tuesday" and "last
/// Tuesday" in a four-Tuesday month) collapse to one candidate.
pub(super) fn by_week_days(
    year: i32,
    month: u32,
    ordinals: &BTreeSet<WeekOrdinal>,
    weekdays: &BTreeSet<DayOfWeek>,
) -> Vec<NaiveDate> {
    let mut days = BTreeSet::new();
    for &ordinal in ordinals {
        for &weekday in weekdays {
            if let Some(date) = resolve_ordinal(year, month, ordinal, weekday) {
                days.insert(date);
            }
        }
    }
    days.into_iter().collect()
}

/// Configured day numbers that exist in the month, ascending.
/// Day numbers past the month's length are skipped, not clamped.
pub(super) fn month_days(year: i32, month: u32, days: &BTreeSet<u32>) -> Vec<NaiveDate> {
    let month_length = days_in_month(year, month);
    days.iter()
        .filter(|&&day| day >= 1 && day <= month_length)
        .filter_map(|&day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

/// Fixed day of month, clamped to the month's length (Feb 29 -> Feb 28 in
/// non-leap years)
pub(super) fn clamped_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let month_length = days_in_month(year, month);
    if month_length == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.min(month_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_resolve_second_tuesday() {
        let resolved = resolve_ordinal(2023, 4, WeekOrdinal::Second, DayOfWeek::Tuesday);
        assert_eq!(resolved, Some(date(2023, 4, 11)));
    }

    #[test]
    fn test_resolve_last_thursday() {
        let resolved = resolve_ordinal(2023, 4, WeekOrdinal::Last, DayOfWeek::Thursday);
        assert_eq!(resolved, Some(date(2023, 4, 27)));
    }

    #[test]
    fn test_resolve_last_differs_from_fourth() {
        // March 2023 has five Fridays: 3, 10, 17, 24, 31
        let fourth = resolve_ordinal(2023, 3, WeekOrdinal::Fourth, DayOfWeek::Friday);
        let last = resolve_ordinal(2023, 3, WeekOrdinal::Last, DayOfWeek::Friday);
        assert_eq!(fourth, Some(date(2023, 3, 24)));
        assert_eq!(last, Some(date(2023, 3, 31)));
    }

    #[test]
    fn test_by_week_days_deduplicates() {
        // April 2023 has four Tuesdays, so 4th and last coincide on the 25th
        let ordinals = [WeekOrdinal::Fourth, WeekOrdinal::Last].into_iter().collect();
        let weekdays = [DayOfWeek::Tuesday].into_iter().collect();
        let days = by_week_days(2023, 4, &ordinals, &weekdays);
        assert_eq!(days, vec![date(2023, 4, 25)]);
    }

    #[test]
    fn test_month_days_skips_invalid() {
        let days = [1u32, 15, 30, 31].into_iter().collect();
        assert_eq!(
            month_days(2023, 2, &days),
            vec![date(2023, 2, 1), date(2023, 2, 15)]
        );
        assert_eq!(
            month_days(2023, 1, &days),
            vec![
                date(2023, 1, 1),
                date(2023, 1, 15),
                date(2023, 1, 30),
                date(2023, 1, 31)
            ]
        );
    }

    #[test]
    fn test_clamped_day_february() {
        assert_eq!(clamped_day(2023, 2, 29), Some(date(2023, 2, 28)));
        assert_eq!(clamped_day(2024, 2, 29), Some(date(2024, 2, 29)));
    }
}
