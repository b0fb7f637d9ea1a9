// Repeating option module
// Closed set of repeat-rule variants with construction-time validation

use std::collections::BTreeSet;
use std::fmt;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest possible length of each month (February counts its leap length)
const MONTH_MAX_DAYS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Validation failures raised when a repeating option is built from
/// persisted fields. Never produced while advancing occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("repeat interval must be at least 1")]
    InvalidInterval,
    #[error("weekly repeat requires at least one weekday")]
    EmptyWeekdays,
    #[error("monthly repeat requires at least one day of month")]
    EmptyMonthDays,
    #[error("repeat by week requires at least one week ordinal")]
    EmptyWeekOrdinals,
    #[error("yearly repeat requires at least one month")]
    EmptyMonths,
    #[error("month {0} is out of range 1-12")]
    MonthOutOfRange(u32),
    #[error("day of month {0} is out of range 1-31")]
    MonthDayOutOfRange(u32),
    #[error("day {day} does not exist in month {month}")]
    FixedDayOutOfRange { month: u32, day: u32 },
    #[error("lunar day {day} does not exist in lunar month {month}")]
    LunarDayOutOfRange { month: u32, day: u32 },
}

/// Day of the week, numbered the way the calendar displays it:
/// Sunday = 1 through Saturday = 7. Weeks start on Sunday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DayOfWeek {
    Sunday = 1,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Sunday-first weekday number, 1..=7
    pub fn number(&self) -> u32 {
        *self as u32
    }

    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::Sunday),
            2 => Some(Self::Monday),
            3 => Some(Self::Tuesday),
            4 => Some(Self::Wednesday),
            5 => Some(Self::Thursday),
            6 => Some(Self::Friday),
            7 => Some(Self::Saturday),
            _ => None,
        }
    }

    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }

    pub fn all() -> [Self; 7] {
        [
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }
}

/// Position of a weekday within a month: the 1st..4th occurrence counting
/// from day 1, or the final occurrence regardless of count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WeekOrdinal {
    First = 1,
    Second,
    Third,
    Fourth,
    Last,
}

impl WeekOrdinal {
    /// Numeric position for 1st..4th; `None` for the "last" ordinal
    pub fn nth(&self) -> Option<u32> {
        match self {
            Self::First => Some(1),
            Self::Second => Some(2),
            Self::Third => Some(3),
            Self::Fourth => Some(4),
            Self::Last => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
            Self::Fourth => "4th",
            Self::Last => "last",
        }
    }
}

/// How a monthly rule picks its days: fixed day numbers, or
/// weekday-within-week-ordinal pairs ("2nd Tuesday", "last Friday").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthlySelection {
    ByDaysOfMonth(BTreeSet<u32>),
    ByWeek {
        ordinals: BTreeSet<WeekOrdinal>,
        weekdays: BTreeSet<DayOfWeek>,
    },
}

/// A repeat rule. Each variant carries the parameters of its cadence and a
/// positive stride (`interval`, "every Nth unit").
///
/// Construction from persisted fields is unchecked; `validate` (called by
/// the enumerator constructor) rejects empty selection sets, zero intervals
/// and out-of-range calendar fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RepeatingOption {
    EveryDay {
        interval: u32,
    },
    EveryWeek {
        zone: Tz,
        interval: u32,
        weekdays: BTreeSet<DayOfWeek>,
    },
    EveryMonth {
        zone: Tz,
        interval: u32,
        selection: MonthlySelection,
    },
    EveryYear {
        zone: Tz,
        interval: u32,
        months: BTreeSet<u32>,
        ordinals: BTreeSet<WeekOrdinal>,
        weekdays: BTreeSet<DayOfWeek>,
    },
    EveryYearOnFixedDay {
        zone: Tz,
        interval: u32,
        month: u32,
        day: u32,
    },
    LunarEveryYear {
        zone: Tz,
        month: u32,
        day: u32,
    },
}

impl RepeatingOption {
    /// The stride between candidate periods, in the rule's natural unit
    pub fn interval(&self) -> u32 {
        match self {
            Self::EveryDay { interval }
            | Self::EveryWeek { interval, .. }
            | Self::EveryMonth { interval, .. }
            | Self::EveryYear { interval, .. }
            | Self::EveryYearOnFixedDay { interval, .. } => *interval,
            Self::LunarEveryYear { .. } => 1,
        }
    }

    /// The timezone calendar fields are extracted through, if the rule has one
    pub fn zone(&self) -> Option<Tz> {
        match self {
            Self::EveryDay { .. } => None,
            Self::EveryWeek { zone, .. }
            | Self::EveryMonth { zone, .. }
            | Self::EveryYear { zone, .. }
            | Self::EveryYearOnFixedDay { zone, .. }
            | Self::LunarEveryYear { zone, .. } => Some(*zone),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EveryDay { .. } => "Daily",
            Self::EveryWeek { .. } => "Weekly",
            Self::EveryMonth { .. } => "Monthly",
            Self::EveryYear { .. } => "Yearly",
            Self::EveryYearOnFixedDay { .. } => "Yearly (fixed day)",
            Self::LunarEveryYear { .. } => "Lunar yearly",
        }
    }

    /// Check the rule's selection sets and ranges
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::EveryDay { interval } => check_interval(*interval),
            Self::EveryWeek {
                interval, weekdays, ..
            } => {
                check_interval(*interval)?;
                if weekdays.is_empty() {
                    return Err(ConfigurationError::EmptyWeekdays);
                }
                Ok(())
            }
            Self::EveryMonth {
                interval,
                selection,
                ..
            } => {
                check_interval(*interval)?;
                match selection {
                    MonthlySelection::ByDaysOfMonth(days) => {
                        if days.is_empty() {
                            return Err(ConfigurationError::EmptyMonthDays);
                        }
                        for &day in days {
                            if day < 1 || day > 31 {
                                return Err(ConfigurationError::MonthDayOutOfRange(day));
                            }
                        }
                        Ok(())
                    }
                    MonthlySelection::ByWeek { ordinals, weekdays } => {
                        if ordinals.is_empty() {
                            return Err(ConfigurationError::EmptyWeekOrdinals);
                        }
                        if weekdays.is_empty() {
                            return Err(ConfigurationError::EmptyWeekdays);
                        }
                        Ok(())
                    }
                }
            }
            Self::EveryYear {
                interval,
                months,
                ordinals,
                weekdays,
                ..
            } => {
                check_interval(*interval)?;
                if months.is_empty() {
                    return Err(ConfigurationError::EmptyMonths);
                }
                for &month in months {
                    check_month(month)?;
                }
                if ordinals.is_empty() {
                    return Err(ConfigurationError::EmptyWeekOrdinals);
                }
                if weekdays.is_empty() {
                    return Err(ConfigurationError::EmptyWeekdays);
                }
                Ok(())
            }
            Self::EveryYearOnFixedDay {
                interval,
                month,
                day,
                ..
            } => {
                check_interval(*interval)?;
                check_month(*month)?;
                if *day < 1 || *day > MONTH_MAX_DAYS[(*month - 1) as usize] {
                    return Err(ConfigurationError::FixedDayOutOfRange {
                        month: *month,
                        day: *day,
                    });
                }
                Ok(())
            }
            Self::LunarEveryYear { month, day, .. } => {
                check_month(*month)?;
                // Lunar months run 29 or 30 days
                if *day < 1 || *day > 30 {
                    return Err(ConfigurationError::LunarDayOutOfRange {
                        month: *month,
                        day: *day,
                    });
                }
                Ok(())
            }
        }
    }
}

fn check_interval(interval: u32) -> Result<(), ConfigurationError> {
    if interval < 1 {
        return Err(ConfigurationError::InvalidInterval);
    }
    Ok(())
}

fn check_month(month: u32) -> Result<(), ConfigurationError> {
    if month < 1 || month > 12 {
        return Err(ConfigurationError::MonthOutOfRange(month));
    }
    Ok(())
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_label(month: u32) -> &'static str {
    MONTH_LABELS
        .get((month.saturating_sub(1)) as usize)
        .copied()
        .unwrap_or("?")
}

fn join_weekdays(weekdays: &BTreeSet<DayOfWeek>) -> String {
    weekdays
        .iter()
        .map(|day| day.short_label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_ordinals(ordinals: &BTreeSet<WeekOrdinal>) -> String {
    ordinals
        .iter()
        .map(|ordinal| ordinal.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cadence(unit: &str, interval: u32) -> String {
    if interval == 1 {
        format!("Every {unit}")
    } else {
        format!("Every {interval} {unit}s")
    }
}

impl fmt::Display for RepeatingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EveryDay { interval } => write!(f, "{}", cadence("day", *interval)),
            Self::EveryWeek {
                interval, weekdays, ..
            } => write!(f, "{} on {}", cadence("week", *interval), join_weekdays(weekdays)),
            Self::EveryMonth {
                interval,
                selection,
                ..
            } => match selection {
                MonthlySelection::ByDaysOfMonth(days) => {
                    let days = days
                        .iter()
                        .map(|day| day.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, "{} on day {}", cadence("month", *interval), days)
                }
                MonthlySelection::ByWeek { ordinals, weekdays } => write!(
                    f,
                    "{} on the {} {}",
                    cadence("month", *interval),
                    join_ordinals(ordinals),
                    join_weekdays(weekdays)
                ),
            },
            Self::EveryYear {
                interval,
                months,
                ordinals,
                weekdays,
                ..
            } => {
                let months = months
                    .iter()
                    .map(|&month| month_label(month))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "{} in {} on the {} {}",
                    cadence("year", *interval),
                    months,
                    join_ordinals(ordinals),
                    join_weekdays(weekdays)
                )
            }
            Self::EveryYearOnFixedDay {
                interval,
                month,
                day,
                ..
            } => write!(
                f,
                "{} on {} {}",
                cadence("year", *interval),
                month_label(*month),
                day
            ),
            Self::LunarEveryYear { month, day, .. } => {
                write!(f, "Every lunar year on {month}/{day}")
            }
        }
    }
}
