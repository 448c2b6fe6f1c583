//! Daily time entry model.
//!
//! This module defines the [`DailyEntry`] struct, one row of a personal
//! timesheet: the day it belongs to, when work started and ended, and the
//! break taken as free-form duration text.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{TimesheetError, TimesheetResult};

/// Represents one block of work recorded in a timesheet.
///
/// A day may have several entries (e.g. a split shift); they are summed
/// per day before the daily cap is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// The day this entry is booked on.
    pub day: NaiveDate,
    /// When work started.
    pub start: NaiveDateTime,
    /// When work ended.
    pub end: NaiveDateTime,
    /// The break as written in the timesheet, e.g. `"00:30:00"` or `"45min"`.
    #[serde(default)]
    pub break_text: String,
}

impl DailyEntry {
    /// Returns the milliseconds worked between start and end, before any break.
    ///
    /// An entry that ends before it starts has no span.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::DailyEntry;
    /// use chrono::{NaiveDate, NaiveDateTime};
    ///
    /// let entry = DailyEntry {
    ///     day: NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
    ///     start: NaiveDateTime::parse_from_str("2023-09-04 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end: NaiveDateTime::parse_from_str("2023-09-04 16:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     break_text: "00:30:00".to_string(),
    /// };
    /// assert_eq!(entry.span_millis(), (8 * 3600 + 1800) * 1000);
    /// ```
    pub fn span_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds().max(0)
    }

    /// Checks that the entry does not end before it starts.
    ///
    /// # Arguments
    ///
    /// * `row` - The row number reported in the error
    pub fn validate(&self, row: usize) -> TimesheetResult<()> {
        if self.end < self.start {
            return Err(TimesheetError::InvalidEntry {
                row,
                message: format!("end {} is before start {}", self.end, self.start),
            });
        }
        Ok(())
    }
}
