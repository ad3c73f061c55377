//! Julian day to calendar conversion.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Julian day of the Unix epoch, 1970-01-01T00:00:00Z
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Errors that can occur converting a Julian day to a calendar instant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Julian day is not finite: {julian_day}")]
    NotFinite { julian_day: f64 },
    #[error("Julian day {julian_day} is outside the representable calendar range")]
    OutOfRange { julian_day: f64 },
}

/// Turns a fractional Julian day into a UTC instant.
pub trait CalendarConverter {
    fn to_utc(&self, julian_day: f64) -> Result<DateTime<Utc>, CalendarError>;
}

/// Proleptic Gregorian conversion, Julian day counted in UT.
#[derive(Debug, Clone, Copy, Default)]
pub struct JulianDayCalendar;

impl CalendarConverter for JulianDayCalendar {
    fn to_utc(&self, julian_day: f64) -> Result<DateTime<Utc>, CalendarError> {
        if !julian_day.is_finite() {
            return Err(CalendarError::NotFinite { julian_day });
        }
        let seconds = (julian_day - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        if seconds.abs() >= i64::MAX as f64 {
            return Err(CalendarError::OutOfRange { julian_day });
        }
        let whole = seconds.floor();
        let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
            .ok_or(CalendarError::OutOfRange { julian_day })
    }
}

/// Convert a Julian day to a UTC instant.
pub fn julian_day_to_datetime(julian_day: f64) -> Result<DateTime<Utc>, CalendarError> {
    JulianDayCalendar.to_utc(julian_day)
}
