//! Per-day and per-month result models.
//!
//! This module contains [`DailyResult`], the ordered [`DailyResults`]
//! collection produced by the daily calculation, and [`MonthlyTotals`].

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditWarning;

/// The computed hours for a single day.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::DailyResult;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let result = DailyResult {
///     day: NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
///     effective_hours: Decimal::new(11, 0),
///     capped_hours: Decimal::new(10, 0),
///     overtime_hours: Decimal::new(2, 0),
/// };
/// assert!(result.was_capped());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    /// The day these hours belong to.
    pub day: NaiveDate,
    /// Worked hours minus breaks, summed over all entries of the day.
    pub effective_hours: Decimal,
    /// Effective hours limited to the daily cap.
    pub capped_hours: Decimal,
    /// Capped hours minus the daily target; negative on short days.
    pub overtime_hours: Decimal,
}

impl DailyResult {
    /// Returns true if the daily cap cut off part of the effective hours.
    pub fn was_capped(&self) -> bool {
        self.effective_hours > self.capped_hours
    }
}

/// Daily results for one month, keyed and ordered by day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResults {
    /// One result per day that had at least one entry.
    pub days: BTreeMap<NaiveDate, DailyResult>,
    /// Recoverable problems found while computing the results.
    pub warnings: Vec<AuditWarning>,
}

impl DailyResults {
    /// Returns the result for a specific day, if any entries were booked on it.
    pub fn get(&self, day: NaiveDate) -> Option<&DailyResult> {
        self.days.get(&day)
    }

    /// Iterates over the daily results in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = &DailyResult> {
        self.days.values()
    }

    /// Returns the number of days with results.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no day had any entries.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Total effective and overtime hours over a set of days.
///
/// Totals are additive, so the totals of two disjoint sets of days can be
/// combined with `+`.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::MonthlyTotals;
/// use rust_decimal::Decimal;
///
/// let first = MonthlyTotals::new(Decimal::new(40, 0), Decimal::new(2, 0));
/// let second = MonthlyTotals::new(Decimal::new(30, 0), Decimal::new(-1, 0));
/// let combined = first + second;
/// assert_eq!(combined.total_effective_hours, Decimal::new(70, 0));
/// assert_eq!(combined.total_overtime_hours, Decimal::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Sum of effective hours (uncapped).
    pub total_effective_hours: Decimal,
    /// Sum of daily overtime (may be negative).
    pub total_overtime_hours: Decimal,
}

impl MonthlyTotals {
    /// Creates totals from their two components.
    pub fn new(total_effective_hours: Decimal, total_overtime_hours: Decimal) -> Self {
        Self {
            total_effective_hours,
            total_overtime_hours,
        }
    }
}

impl Add for MonthlyTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_effective_hours: self.total_effective_hours + rhs.total_effective_hours,
            total_overtime_hours: self.total_overtime_hours + rhs.total_overtime_hours,
        }
    }
}

impl<'a> Sum<&'a DailyResult> for MonthlyTotals {
    fn sum<I: Iterator<Item = &'a DailyResult>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, day| {
            acc + Self::new(day.effective_hours, day.overtime_hours)
        })
    }
}

impl Sum for MonthlyTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
