//! Break duration parsing.
//!
//! Breaks are typed by hand into the timesheet, so the same half hour may
//! show up as `00:30:00`, `0:30`, `30min`, `0.5h` or `0 days 00:30:00`.
//! This module turns that free-form text into a [`Duration`].

use std::str::FromStr;

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Break text that could not be read as a duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{text}' is not a duration")]
pub struct BreakParseError {
    /// The text as it appeared in the timesheet.
    pub text: String,
}

/// Parses free-form break text into a duration.
///
/// Accepted forms:
/// - clock notation `H:MM` or `H:MM:SS` (seconds may be fractional)
/// - clock notation with a day prefix, `N days HH:MM:SS`
/// - one or more number/unit pairs, e.g. `45min`, `1h 30m`, `1.5 hours`
///
/// Blank text is a zero-length break. Negative values and bare numbers
/// without a unit are rejected.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::parse_break_duration;
/// use chrono::Duration;
///
/// assert_eq!(parse_break_duration("00:30:00").unwrap(), Duration::minutes(30));
/// assert_eq!(parse_break_duration("1h 15min").unwrap(), Duration::minutes(75));
/// assert_eq!(parse_break_duration("0.5h").unwrap(), Duration::minutes(30));
/// assert!(parse_break_duration("lunch").is_err());
/// ```
pub fn parse_break_duration(text: &str) -> Result<Duration, BreakParseError> {
    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Ok(Duration::zero());
    }

    let seconds = if normalized.contains(':') {
        parse_clock_with_days(&normalized)
    } else {
        parse_unit_pairs(&normalized)
    };

    seconds
        .and_then(|s| s.checked_mul(Decimal::ONE_THOUSAND))
        .and_then(|ms| ms.round().to_i64())
        .map(Duration::milliseconds)
        .ok_or_else(|| BreakParseError {
            text: text.to_string(),
        })
}

/// Parses `[N day[s]] H:MM[:SS]` into seconds.
fn parse_clock_with_days(text: &str) -> Option<Decimal> {
    let (days, clock) = match text.find("day") {
        Some(idx) => {
            let days = parse_non_negative(text[..idx].trim())?;
            let rest = text[idx..].trim_start_matches(|c: char| c.is_ascii_alphabetic());
            (days, rest.trim())
        }
        None => (Decimal::ZERO, text),
    };

    let parts: Vec<&str> = clock.split(':').map(str::trim).collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let hours = parse_whole(parts[0])?;
    let minutes = parse_whole(parts[1])?;
    let seconds = match parts.get(2) {
        Some(s) => parse_non_negative(s)?,
        None => Decimal::ZERO,
    };
    if minutes >= Decimal::new(60, 0) || seconds >= Decimal::new(60, 0) {
        return None;
    }

    days.checked_mul(Decimal::new(86_400, 0))?
        .checked_add(hours.checked_mul(Decimal::new(3600, 0))?)?
        .checked_add(minutes * Decimal::new(60, 0))?
        .checked_add(seconds)
}

/// Parses a sequence like `1h 30min` into seconds.
fn parse_unit_pairs(text: &str) -> Option<Decimal> {
    let mut rest = text.trim_start();
    let mut total = Decimal::ZERO;
    let mut pairs = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let value = parse_non_negative(&rest[..number_len].replace(',', "."))?;
        rest = rest[number_len..].trim_start();

        let unit_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let unit_seconds = unit_seconds(&rest[..unit_len])?;
        rest = rest[unit_len..].trim_start();

        total = total.checked_add(value.checked_mul(unit_seconds)?)?;
        pairs += 1;
    }

    (pairs > 0).then_some(total)
}

fn unit_seconds(unit: &str) -> Option<Decimal> {
    let seconds = match unit {
        "d" | "day" | "days" => 86_400,
        "h" | "hr" | "hrs" | "hour" | "hours" | "std" => 3600,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        _ => return None,
    };
    Some(Decimal::new(seconds, 0))
}

fn parse_whole(s: &str) -> Option<Decimal> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(s).ok()
}

fn parse_non_negative(s: &str) -> Option<Decimal> {
    if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
        return None;
    }
    Decimal::from_str(s).ok().filter(|d| !d.is_sign_negative())
}
