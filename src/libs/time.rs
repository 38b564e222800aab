//! Wall-clock arithmetic for task slots.
//!
//! Task start times are stored the way users type them, `HH:MM` in 24-hour
//! format without a timezone. All interval math happens on minutes since
//! midnight, so a task starting at `09:30` that lasts 45 minutes occupies
//! `[570, 615)`.

use super::error::TaskError;
use chrono::NaiveDate;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const MAX_DURATION: u32 = MINUTES_PER_DAY;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts `HH:MM` into minutes since midnight.
///
/// Hours take one or two digits, minutes exactly two. Values outside
/// `00:00..=23:59` are rejected rather than normalized.
pub fn to_minutes(time: &str) -> Result<u32, TaskError> {
    let invalid = || TaskError::InvalidTimeFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// Renders minutes since midnight as `HH:MM`.
///
/// End times past midnight keep counting hours (`24:30`), which keeps the
/// output unambiguous for a slot that spills into the next day.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Normalizes a user supplied time to the canonical zero-padded form.
pub fn normalize_time(time: &str) -> Result<String, TaskError> {
    to_minutes(time).map(format_minutes)
}

pub fn parse_date(date: &str) -> Result<NaiveDate, TaskError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| TaskError::InvalidDate(date.to_string()))
}

/// Accepts `1..=MAX_DURATION` minutes. Slots never wrap into the next day,
/// so a single task cannot be longer than a day.
pub fn validate_duration(duration: i64) -> Result<u32, TaskError> {
    match u32::try_from(duration) {
        Ok(minutes) if minutes > 0 && minutes <= MAX_DURATION => Ok(minutes),
        _ => Err(TaskError::InvalidDuration(duration)),
    }
}
