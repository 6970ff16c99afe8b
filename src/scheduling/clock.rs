//! Minute-precision time arithmetic on `HH:MM` values and calendar dates.
//!
//! All comparisons and arithmetic operate on integer minutes since
//! midnight. The caller provides every input explicitly; nothing here
//! reads the system clock.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::Date;

use super::error::SchedulingError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute granularity, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from raw minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, SchedulingError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(SchedulingError::InvalidTimeRange(format!(
                "{minutes} minutes is past the end of the day"
            )));
        }
        Ok(TimeOfDay(minutes))
    }

    /// Parses a strict zero-padded `HH:MM` string.
    pub fn parse(value: &str) -> Result<Self, SchedulingError> {
        let malformed = || SchedulingError::InvalidTimeFormat(value.to_string());

        let (hours, minutes) = value.split_once(':').ok_or_else(malformed)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(malformed());
        }
        let hours: u16 = hours.parse().map_err(|_| malformed())?;
        let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
        if hours >= 24 || minutes >= 60 {
            return Err(malformed());
        }
        Ok(TimeOfDay(hours * 60 + minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Adds `n` minutes, staying within the same day. Rolling past 23:59
    /// is out of scope for a single-day schedule and fails instead.
    pub fn add_minutes(self, n: u16) -> Result<Self, SchedulingError> {
        let total = self.0 as u32 + n as u32;
        if total >= MINUTES_PER_DAY as u32 {
            return Err(SchedulingError::InvalidTimeRange(format!(
                "{self} plus {n} minutes rolls past the end of the day"
            )));
        }
        Ok(TimeOfDay(total as u16))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        TimeOfDay::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<Date, SchedulingError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
        .map_err(|_| SchedulingError::InvalidTimeFormat(value.to_string()))
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}
