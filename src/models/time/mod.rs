// Time module
// Epoch-second timestamps and occurrence times used by the recurrence engine

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// An instant in time: epoch seconds paired with the IANA timezone the
/// instant is displayed and reasoned about in.
///
/// Calendar fields (year, month, day-of-week, ...) are always extracted
/// through `zone`, never through the system-local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStamp {
    pub seconds: i64,
    pub zone: Tz,
}

impl TimeStamp {
    /// Create a timestamp from epoch seconds and a timezone
    pub fn new(seconds: i64, zone: Tz) -> Self {
        Self { seconds, zone }
    }

    /// Create a timestamp from epoch seconds and an IANA zone name.
    /// Returns `None` when the name is not a known timezone, since names
    /// arrive from persisted data.
    pub fn from_zone_name(seconds: i64, zone: &str) -> Option<Self> {
        let zone: Tz = zone.parse().ok()?;
        Some(Self { seconds, zone })
    }

    /// The instant viewed through this timestamp's timezone
    pub fn local(&self) -> DateTime<Tz> {
        DateTime::<Utc>::from_timestamp(self.seconds, 0)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&self.zone)
    }

    /// Same instant shifted by a number of seconds
    pub fn shifted(&self, delta_seconds: i64) -> Self {
        Self {
            seconds: self.seconds + delta_seconds,
            zone: self.zone,
        }
    }
}

/// One concrete occurrence of an event: either an instantaneous point or a
/// half-open period `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    At(TimeStamp),
    Period(TimeStamp, TimeStamp),
}

impl EventTime {
    /// An instantaneous occurrence
    pub fn at(time: TimeStamp) -> Self {
        Self::At(time)
    }

    /// A period occurrence `[start, end)`.
    ///
    /// Panics when `end <= start`: an inverted period reaching the engine
    /// is a caller bug, not a runtime condition to recover from.
    pub fn period(start: TimeStamp, end: TimeStamp) -> Self {
        assert!(
            end.seconds > start.seconds,
            "period end must be after period start"
        );
        Self::Period(start, end)
    }

    /// The start bound of the occurrence
    pub fn start(&self) -> TimeStamp {
        match self {
            Self::At(time) => *time,
            Self::Period(start, _) => *start,
        }
    }

    /// Duration in seconds; zero for instantaneous occurrences
    pub fn duration_seconds(&self) -> i64 {
        match self {
            Self::At(_) => 0,
            Self::Period(start, end) => {
                assert!(
                    end.seconds > start.seconds,
                    "period end must be after period start"
                );
                end.seconds - start.seconds
            }
        }
    }

    /// Rebuild this occurrence at a new start instant, preserving the
    /// shape, the exact duration and the display timezones of both bounds.
    pub fn with_start_seconds(&self, start_seconds: i64) -> Self {
        match self {
            Self::At(time) => Self::At(TimeStamp::new(start_seconds, time.zone)),
            Self::Period(start, end) => {
                let duration = self.duration_seconds();
                Self::Period(
                    TimeStamp::new(start_seconds, start.zone),
                    TimeStamp::new(start_seconds + duration, end.zone),
                )
            }
        }
    }
}
