//! Occurrence enumeration for repeating events.
//! Given a rule and the last known occurrence, computes the next one,
//! honoring interval cadence, selection policies and an optional end
//! boundary. One focused submodule per cadence.

use crate::models::repeating::{ConfigurationError, RepeatingOption};
use crate::models::time::{EventTime, TimeStamp};

mod daily;
mod lunar;
mod monthly;
mod utils;
mod weekly;
mod yearly;

/// Stateless occurrence calculator bound to one repeat rule.
///
/// `advance` is a pure function of its arguments; the enumerator holds no
/// mutable state and a shared instance may be used from any number of
/// threads.
#[derive(Debug, Clone)]
pub struct OccurrenceEnumerator {
    option: RepeatingOption,
}

impl OccurrenceEnumerator {
    /// Bind an enumerator to a rule, validating the rule first.
    ///
    /// Fails with a [`ConfigurationError`] when a required selection set is
    /// empty, the interval is not positive, or a calendar field is out of
    /// range — rules are rebuilt from persisted data and may be corrupt.
    pub fn new(option: RepeatingOption) -> Result<Self, ConfigurationError> {
        option.validate()?;
        Ok(Self { option })
    }

    /// The rule this enumerator is bound to
    pub fn option(&self) -> &RepeatingOption {
        &self.option
    }

    /// The smallest occurrence strictly after `from` (by start bound) that
    /// satisfies the rule, or `None` when the next occurrence would start
    /// after `until` (inclusive) or the rule admits no further occurrence.
    ///
    /// A `Period` advances to a `Period` of identical duration; an `At`
    /// advances to an `At`. Calendar fields are computed in the rule's
    /// timezone; the returned timestamps keep the input's display zone.
    pub fn advance(&self, from: &EventTime, until: Option<TimeStamp>) -> Option<EventTime> {
        let start = from.start();
        let next_seconds = match &self.option {
            RepeatingOption::EveryDay { interval } => {
                Some(daily::next_start(start.seconds, *interval))
            }
            RepeatingOption::EveryWeek {
                zone,
                interval,
                weekdays,
            } => weekly::next_start(start.seconds, *zone, *interval, weekdays),
            RepeatingOption::EveryMonth {
                zone,
                interval,
                selection,
            } => monthly::next_start(start.seconds, *zone, *interval, selection),
            RepeatingOption::EveryYear {
                zone,
                interval,
                months,
                ordinals,
                weekdays,
            } => yearly::next_start(start.seconds, *zone, *interval, months, ordinals, weekdays),
            RepeatingOption::EveryYearOnFixedDay {
                zone,
                interval,
                month,
                day,
            } => yearly::fixed_day_next_start(start.seconds, *zone, *interval, *month, *day),
            RepeatingOption::LunarEveryYear { zone, month, day } => {
                lunar::next_start(start.seconds, *zone, *month, *day)
            }
        }?;

        debug_assert!(next_seconds > start.seconds);

        if let Some(until) = until {
            if next_seconds > until.seconds {
                return None;
            }
        }

        Some(from.with_start_seconds(next_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::repeating::DayOfWeek;
    use std::collections::BTreeSet;

    fn at(seconds: i64) -> EventTime {
        EventTime::at(TimeStamp::new(seconds, chrono_tz::UTC))
    }

    #[test]
    fn test_new_rejects_empty_weekdays() {
        let option = RepeatingOption::EveryWeek {
            zone: chrono_tz::Asia::Seoul,
            interval: 1,
            weekdays: BTreeSet::new(),
        };
        assert_eq!(
            OccurrenceEnumerator::new(option).err(),
            Some(ConfigurationError::EmptyWeekdays)
        );
    }

    #[test]
    fn test_daily_advances_by_interval_days() {
        let enumerator =
            OccurrenceEnumerator::new(RepeatingOption::EveryDay { interval: 1 }).unwrap();
        let next = enumerator.advance(&at(10), None).unwrap();
        assert_eq!(next.start().seconds, 10 + 86_400);
    }

    #[test]
    fn test_until_is_inclusive_on_start() {
        let enumerator =
            OccurrenceEnumerator::new(RepeatingOption::EveryDay { interval: 1 }).unwrap();
        let boundary = TimeStamp::new(10 + 86_400, chrono_tz::UTC);
        let next = enumerator.advance(&at(10), Some(boundary));
        assert_eq!(next.unwrap().start().seconds, 10 + 86_400);

        let tight = TimeStamp::new(10 + 86_400 - 1, chrono_tz::UTC);
        assert!(enumerator.advance(&at(10), Some(tight)).is_none());
    }

    #[test]
    fn test_period_keeps_duration_and_shape() {
        let enumerator =
            OccurrenceEnumerator::new(RepeatingOption::EveryDay { interval: 2 }).unwrap();
        let from = EventTime::period(
            TimeStamp::new(10, chrono_tz::UTC),
            TimeStamp::new(110, chrono_tz::UTC),
        );
        let next = enumerator.advance(&from, None).unwrap();
        assert!(matches!(next, EventTime::Period(_, _)));
        assert_eq!(next.start().seconds, 10 + 2 * 86_400);
        assert_eq!(next.duration_seconds(), 100);
    }

    #[test]
    fn test_enumerator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OccurrenceEnumerator>();
    }

    #[test]
    fn test_weekly_same_week_first() {
        // 2023-04-11 07:00 KST is a Tuesday; Friday of the same week wins
        let enumerator = OccurrenceEnumerator::new(RepeatingOption::EveryWeek {
            zone: chrono_tz::Asia::Seoul,
            interval: 1,
            weekdays: [DayOfWeek::Tuesday, DayOfWeek::Friday].into_iter().collect(),
        })
        .unwrap();

        let from = EventTime::at(TimeStamp::new(1_681_164_000, chrono_tz::Asia::Seoul));
        let next = enumerator.advance(&from, None).unwrap();
        assert_eq!(next.start().seconds, 1_681_164_000 + 3 * 86_400);
    }
}
