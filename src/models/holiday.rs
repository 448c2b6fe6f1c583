//! Public holiday model and the holiday calendar seam.
//!
//! Target hours exclude public holidays that fall on weekdays. Which days
//! are holidays depends on the year and the region, so lookups go through
//! the [`HolidayCalendar`] trait. [`ConfiguredHolidayCalendar`] is the
//! implementation backed by configuration files.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Region name for holidays observed everywhere.
pub const NATIONAL_REGION: &str = "national";

/// Represents a single public holiday.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2023, 10, 3).unwrap(),
///     name: "Day of German Unity".to_string(),
///     region: "national".to_string(),
/// };
/// assert!(holiday.applies_to("TH"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday.
    pub name: String,
    /// The region where this holiday applies (e.g. "national", "TH", "BY").
    pub region: String,
}

impl PublicHoliday {
    /// Checks whether this holiday is observed in the given region.
    ///
    /// National holidays apply to every region; region names are compared
    /// case-insensitively.
    pub fn applies_to(&self, region: &str) -> bool {
        self.region.eq_ignore_ascii_case(NATIONAL_REGION) || self.region.eq_ignore_ascii_case(region)
    }
}

/// Source of public holidays keyed by year and region.
pub trait HolidayCalendar {
    /// Returns every holiday date observed in `region` during `year`.
    fn holidays(&self, year: i32, region: &str) -> BTreeSet<NaiveDate>;

    /// Checks whether a single date is a holiday in `region`.
    fn is_holiday(&self, date: NaiveDate, region: &str) -> bool {
        self.holidays(date.year(), region).contains(&date)
    }
}

/// A holiday calendar built from an explicit list of holidays.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{ConfiguredHolidayCalendar, HolidayCalendar, PublicHoliday};
/// use chrono::NaiveDate;
///
/// let calendar = ConfiguredHolidayCalendar::new(vec![PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
///     name: "Reformation Day".to_string(),
///     region: "TH".to_string(),
/// }]);
///
/// let reformation_day = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
/// assert!(calendar.is_holiday(reformation_day, "TH"));
/// assert!(!calendar.is_holiday(reformation_day, "BY"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredHolidayCalendar {
    holidays: Vec<PublicHoliday>,
}

impl ConfiguredHolidayCalendar {
    /// Creates a calendar from a list of holidays.
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        let mut holidays = holidays;
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self { holidays }
    }

    /// Returns all holidays known to the calendar, oldest first.
    pub fn entries(&self) -> &[PublicHoliday] {
        &self.holidays
    }
}

impl HolidayCalendar for ConfiguredHolidayCalendar {
    fn holidays(&self, year: i32, region: &str) -> BTreeSet<NaiveDate> {
        self.holidays
            .iter()
            .filter(|h| h.date.year() == year && h.applies_to(region))
            .map(|h| h.date)
            .collect()
    }
}
