//! Calendar month identification.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{TimesheetError, TimesheetResult};

/// A calendar month, the unit every report is computed for.
///
/// Timesheet files are named after their month as `YY_MM`, optionally
/// followed by ` - <anything>` (e.g. `23_09 - copy`).
///
/// # Example
///
/// ```
/// use timesheet_engine::models::MonthKey;
///
/// let month = MonthKey::from_file_stem("23_09 - copy").unwrap();
/// assert_eq!(month, MonthKey::new(2023, 9).unwrap());
/// assert_eq!(month.to_string(), "23_09");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    /// The full calendar year.
    pub year: i32,
    /// The month number (1-12).
    pub month: u32,
}

impl MonthKey {
    /// Creates a month key, rejecting month numbers outside 1-12.
    pub fn new(year: i32, month: u32) -> TimesheetResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(TimesheetError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// Parses a month from a file stem following the `YY_MM` convention.
    ///
    /// Year and month are exactly two digits each; years are taken to be
    /// in the 2000s.
    pub fn from_file_stem(stem: &str) -> TimesheetResult<Self> {
        let invalid = || TimesheetError::InvalidFileName {
            name: stem.to_string(),
        };

        let head = stem.split('-').next().unwrap_or_default().trim();
        let (yy, mm) = head.split_once('_').ok_or_else(invalid)?;
        let yy = two_digits(yy.trim()).ok_or_else(invalid)?;
        let mm = two_digits(mm.trim()).ok_or_else(invalid)?;

        Self::new(2000 + yy as i32, mm)
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`; fall back to the epoch date for hand-built keys.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Returns the last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.and_then(|d| d.pred_opt()).unwrap_or(first)
    }

    /// Iterates over every calendar day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    /// Iterates over the Monday-to-Friday days of the month.
    pub fn weekdays(&self) -> impl Iterator<Item = NaiveDate> {
        self.days().filter(|d| is_weekday(*d))
    }

    /// Checks whether a date lies in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}_{:02}", self.year.rem_euclid(100), self.month)
    }
}

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn two_digits(text: &str) -> Option<u32> {
    if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
