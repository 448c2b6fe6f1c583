//! Absence period model.
//!
//! Vacation and sick leave reduce the target hours of a month. This module
//! defines the [`AbsencePeriod`] type and how a period is matched against a
//! target month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The reason for an absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    /// Paid vacation.
    #[default]
    Vacation,
    /// Sick leave.
    Sick,
}

/// How absence periods are matched against the month being processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceMatching {
    /// A period counts if it shares at least one day with the month.
    #[default]
    Overlap,
    /// A period counts only if its start or end date lies inside the month.
    /// A period spanning the whole month without an endpoint in it is ignored.
    Endpoint,
}

/// An inclusive range of days away from work.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{AbsenceKind, AbsencePeriod, AbsenceMatching};
/// use chrono::NaiveDate;
///
/// let period = AbsencePeriod {
///     start: NaiveDate::from_ymd_opt(2023, 8, 28).unwrap(),
///     end: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
///     kind: AbsenceKind::Vacation,
/// };
/// assert!(period.matches_month(2023, 9, AbsenceMatching::Overlap));
/// assert!(period.matches_month(2023, 9, AbsenceMatching::Endpoint));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsencePeriod {
    /// First day of the absence (inclusive).
    pub start: NaiveDate,
    /// Last day of the absence (inclusive).
    pub end: NaiveDate,
    /// Why the time was taken off.
    #[serde(default)]
    pub kind: AbsenceKind,
}

impl AbsencePeriod {
    /// Returns every calendar day of the period in order.
    ///
    /// A period whose end lies before its start yields no days.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Checks whether the period is relevant for the given month.
    ///
    /// # Arguments
    ///
    /// * `year` - The calendar year of the month
    /// * `month` - The month number (1-12)
    /// * `matching` - Which matching rule to apply
    pub fn matches_month(&self, year: i32, month: u32, matching: AbsenceMatching) -> bool {
        let in_month = |d: NaiveDate| d.year() == year && d.month() == month;

        match matching {
            AbsenceMatching::Endpoint => in_month(self.start) || in_month(self.end),
            AbsenceMatching::Overlap => {
                let key = (year, month);
                (self.start.year(), self.start.month()) <= key
                    && (self.end.year(), self.end.month()) >= key
                    && self.start <= self.end
            }
        }
    }
}
