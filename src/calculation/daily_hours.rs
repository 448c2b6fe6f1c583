//! Daily effective hours, capping and overtime.
//!
//! This module turns raw timesheet entries into one [`DailyResult`] per day:
//! the worked span minus the break, summed per day, limited to the daily cap,
//! and compared against the daily target.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{
    AuditWarning, DailyEntry, DailyResult, DailyResults, WARN_BREAK_EXCEEDS_SPAN,
    WARN_BREAK_UNPARSEABLE, WarningSeverity,
};

use super::parse_break_duration;

/// Default contractual hours per working day.
pub const DEFAULT_TARGET_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Default upper limit on countable hours per day.
pub const DEFAULT_DAILY_CAP_HOURS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Computes effective, capped and overtime hours for every day with entries.
///
/// For each entry the break is parsed from its free-form text and subtracted
/// from the span between start and end. Entries booked on the same day are
/// summed before the cap is applied, and overtime is the capped value minus
/// `target_per_day` (negative on short days).
///
/// Unparseable break text counts as no break and adds a
/// `BREAK_UNPARSEABLE` warning; a break longer than its entry is limited to
/// the entry span and adds a `BREAK_EXCEEDS_SPAN` warning.
///
/// # Arguments
///
/// * `entries` - The timesheet entries, in any order
/// * `target_per_day` - Contractual hours per day (typically 8)
/// * `cap_hours` - Maximum countable hours per day (typically 10)
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::{
///     compute_daily_results, DEFAULT_DAILY_CAP_HOURS, DEFAULT_TARGET_HOURS_PER_DAY,
/// };
/// use timesheet_engine::models::DailyEntry;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let entry = DailyEntry {
///     day: NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
///     start: NaiveDateTime::parse_from_str("2023-09-04 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2023-09-04 18:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     break_text: "00:30:00".to_string(),
/// };
///
/// let results = compute_daily_results(
///     &[entry],
///     DEFAULT_TARGET_HOURS_PER_DAY,
///     DEFAULT_DAILY_CAP_HOURS,
/// );
/// let day = results.get(NaiveDate::from_ymd_opt(2023, 9, 4).unwrap()).unwrap();
/// assert_eq!(day.effective_hours, Decimal::new(11, 0));
/// assert_eq!(day.capped_hours, Decimal::new(10, 0));
/// assert_eq!(day.overtime_hours, Decimal::new(2, 0));
/// ```
pub fn compute_daily_results(
    entries: &[DailyEntry],
    target_per_day: Decimal,
    cap_hours: Decimal,
) -> DailyResults {
    let mut worked_millis: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut warnings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        let span = entry.span_millis();

        let mut break_millis = match parse_break_duration(&entry.break_text) {
            Ok(duration) => duration.num_milliseconds(),
            Err(err) => {
                warn!(
                    entry = position,
                    day = %entry.day,
                    break_text = %entry.break_text,
                    "Break value is not a duration, counting it as zero"
                );
                warnings.push(AuditWarning::new(
                    WARN_BREAK_UNPARSEABLE,
                    WarningSeverity::Medium,
                    format!("entry {} on {}: {}, counted as no break", position, entry.day, err),
                ));
                0
            }
        };

        if break_millis > span {
            warn!(
                entry = position,
                day = %entry.day,
                break_text = %entry.break_text,
                "Break is longer than the entry, limiting it to the entry span"
            );
            warnings.push(AuditWarning::new(
                WARN_BREAK_EXCEEDS_SPAN,
                WarningSeverity::Low,
                format!(
                    "entry {} on {}: break '{}' exceeds the worked span",
                    position, entry.day, entry.break_text
                ),
            ));
            break_millis = span;
        }

        *worked_millis.entry(entry.day).or_insert(0) += span - break_millis;
    }

    let days = worked_millis
        .into_iter()
        .map(|(day, millis)| {
            let result = daily_result(day, millis_to_hours(millis), target_per_day, cap_hours);
            (day, result)
        })
        .collect();

    DailyResults { days, warnings }
}

/// Builds the result for one day from its summed effective hours.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::daily_result;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2023, 9, 4).unwrap();
/// let result = daily_result(day, Decimal::new(6, 0), Decimal::new(8, 0), Decimal::new(10, 0));
/// assert_eq!(result.capped_hours, Decimal::new(6, 0));
/// assert_eq!(result.overtime_hours, Decimal::new(-2, 0));
/// ```
pub fn daily_result(
    day: NaiveDate,
    effective_hours: Decimal,
    target_per_day: Decimal,
    cap_hours: Decimal,
) -> DailyResult {
    let capped_hours = effective_hours.min(cap_hours);
    DailyResult {
        day,
        effective_hours,
        capped_hours,
        overtime_hours: capped_hours - target_per_day,
    }
}

fn millis_to_hours(millis: i64) -> Decimal {
    Decimal::new(millis, 0) / Decimal::new(MILLIS_PER_HOUR, 0)
}
