//! Wall-clock time samples
//!
//! A sample is taken from the local clock at paint time and discarded after the
//! frame is drawn.

use chrono::{Local, Timelike};
use std::fmt;

/// Hour, minute and second of the local wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// Create a sample, returning `None` if any component is out of range
    ///
    /// Valid ranges are hour 0-23, minute 0-59 and second 0-59.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
        })
    }

    /// Sample the local system clock
    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }

    /// Build a sample from any `chrono` time value
    ///
    /// Leap seconds (reported by `chrono` as second 59 with an extra nanosecond
    /// overflow) stay at 59.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "chrono guarantees hour < 24 and minute/second < 60"
    )]
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second().min(59) as u8,
        }
    }

    /// Hour of the day (0-23)
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of the hour (0-59)
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Second of the minute (0-59)
    pub const fn second(&self) -> u8 {
        self.second
    }
}

/// Formats as `HH:mm:ss` (24-hour, zero padded)
impl fmt::Display for TimeSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour, self.minute, self.second
        )
    }
}
