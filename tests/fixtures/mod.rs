// Test fixtures - reusable test data
// Zone and timestamp builders shared across integration test files

use calendar_recurrence::models::time::{EventTime, TimeStamp};
use chrono::TimeZone;
use chrono_tz::Tz;

pub fn kst() -> Tz {
    chrono_tz::Asia::Seoul
}

pub fn utc() -> Tz {
    chrono_tz::UTC
}

/// Timestamp at a local wall-clock time in `zone`
pub fn stamp(zone: Tz, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> TimeStamp {
    let instant = zone
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap();
    TimeStamp::new(instant.timestamp(), zone)
}

/// Instantaneous occurrence at a local wall-clock time in `zone`
pub fn at(zone: Tz, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> EventTime {
    EventTime::at(stamp(zone, year, month, day, hour, minute))
}
