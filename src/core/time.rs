//! Time-of-day handling for eat-in times
//!
//! Worksheet times arrive either as a fraction of a day (0.5 = noon) or as a
//! literal clock string. Both functions here are total: anything that cannot
//! be read as a time of day becomes [`INVALID_TIME`].

use crate::types::CellValue;
use regex::Regex;
use std::sync::OnceLock;

/// Shown in place of any time that cannot be read
pub const INVALID_TIME: &str = "Invalid Time";

/// How long before eating the food has to be prepared
pub const PREP_LEAD_MINUTES: i64 = 20;

const MINUTES_PER_DAY: u32 = 24 * 60;

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("clock pattern is valid"))
}

/// Convert a cell holding a time into `HH:MM`
///
/// Numbers are fractions of a day, rounded to the nearest minute (half away
/// from zero). Text is accepted as-is when it reads as `H:MM` or `HH:MM`
/// with an hour below 24 and a minute below 60.
pub fn normalize_time(value: &CellValue) -> String {
    match value {
        CellValue::Number(fraction) => match minutes_of_day(*fraction) {
            Some(total) => format_clock(total),
            None => INVALID_TIME.to_string(),
        },
        CellValue::Text(text) if parse_clock(text).is_some() => text.clone(),
        _ => INVALID_TIME.to_string(),
    }
}

/// Preparation time: the eat-in time minus [`PREP_LEAD_MINUTES`]
///
/// An eat-in time earlier than 00:20 gives [`INVALID_TIME`] rather than
/// wrapping into the previous day.
pub fn prep_time(value: &CellValue) -> String {
    let Some(eat) = eat_minutes(value) else {
        return INVALID_TIME.to_string();
    };

    let total = i64::from(eat) - PREP_LEAD_MINUTES;
    match u32::try_from(total) {
        Ok(total) => format_clock(total),
        Err(_) => INVALID_TIME.to_string(),
    }
}

/// Minutes since midnight of a readable eat-in time
fn eat_minutes(value: &CellValue) -> Option<u32> {
    match value {
        CellValue::Number(fraction) => minutes_of_day(*fraction),
        CellValue::Text(text) => parse_clock(text).map(|(hours, minutes)| hours * 60 + minutes),
        CellValue::Empty => None,
    }
}

/// Whole minutes since midnight for a day fraction
///
/// Serials of 1.0 and above carry a date part; only the time of day is kept.
/// A fraction in the last half minute of the day rounds up to 1440 (24:00).
fn minutes_of_day(fraction: f64) -> Option<u32> {
    if !fraction.is_finite() || fraction < 0.0 {
        return None;
    }
    Some((fraction.fract() * f64::from(MINUTES_PER_DAY)).round() as u32)
}

/// Split a clock string into hours and minutes, checking both ranges
fn parse_clock(text: &str) -> Option<(u32, u32)> {
    let caps = clock_pattern().captures(text)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    (hours < 24 && minutes < 60).then_some((hours, minutes))
}

fn format_clock(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
