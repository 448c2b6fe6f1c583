//! Configuration types for timesheet calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_DAILY_CAP_HOURS, DEFAULT_TARGET_HOURS_PER_DAY};
use crate::error::{TimesheetError, TimesheetResult};
use crate::io::DEFAULT_SUMMARY_SUFFIX;
use crate::models::{AbsenceMatching, AbsencePeriod, ConfiguredHolidayCalendar, PublicHoliday};

/// Default text marking the start of the template block in a timesheet.
pub const DEFAULT_TEMPLATE_MARKER: &str = "Copy this block into every new sheet";

/// Header names of the timesheet columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Column holding the day an entry is booked on.
    pub day: String,
    /// Column holding the start timestamp.
    pub start: String,
    /// Column holding the end timestamp.
    pub end: String,
    /// Column holding the break as free-form duration text.
    pub break_duration: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            day: "Day".to_string(),
            start: "Start".to_string(),
            end: "End".to_string(),
            break_duration: "Break".to_string(),
        }
    }
}

/// Calculator settings from `calculator.yaml`.
///
/// Every field except `region` has a default, so a minimal file only needs
/// the region:
///
/// ```yaml
/// region: TH
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalculatorSettings {
    /// Region whose public holidays apply (e.g. "TH").
    pub region: String,
    /// Contractual hours per working day.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,
    /// Maximum countable hours per day.
    #[serde(default = "default_cap_hours")]
    pub cap_hours: Decimal,
    /// Whether absence periods reduce the target hours.
    #[serde(default)]
    pub apply_absence_correction: bool,
    /// How absence periods are matched against a month.
    #[serde(default)]
    pub absence_matching: AbsenceMatching,
    /// Text marking the template block; rows from it onwards are ignored.
    #[serde(default = "default_template_marker")]
    pub template_marker: Option<String>,
    /// File name suffix of monthly summaries.
    #[serde(default = "default_summary_suffix")]
    pub summary_suffix: String,
    /// Header names of the timesheet columns.
    #[serde(default)]
    pub columns: ColumnNames,
    /// Vacation and sick leave periods.
    #[serde(default)]
    pub absences: Vec<AbsencePeriod>,
}

fn default_hours_per_day() -> Decimal {
    DEFAULT_TARGET_HOURS_PER_DAY
}

fn default_cap_hours() -> Decimal {
    DEFAULT_DAILY_CAP_HOURS
}

fn default_template_marker() -> Option<String> {
    Some(DEFAULT_TEMPLATE_MARKER.to_string())
}

fn default_summary_suffix() -> String {
    DEFAULT_SUMMARY_SUFFIX.to_string()
}

impl CalculatorSettings {
    /// Creates settings for a region with every other field defaulted.
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            hours_per_day: default_hours_per_day(),
            cap_hours: default_cap_hours(),
            apply_absence_correction: false,
            absence_matching: AbsenceMatching::default(),
            template_marker: default_template_marker(),
            summary_suffix: default_summary_suffix(),
            columns: ColumnNames::default(),
            absences: Vec::new(),
        }
    }

    /// Checks that the settings can be used for calculation.
    pub fn validate(&self) -> TimesheetResult<()> {
        if self.hours_per_day <= Decimal::ZERO {
            return Err(TimesheetError::InvalidConfig {
                field: "hours_per_day".to_string(),
                message: format!("must be positive, got {}", self.hours_per_day),
            });
        }
        if self.cap_hours < Decimal::ZERO {
            return Err(TimesheetError::InvalidConfig {
                field: "cap_hours".to_string(),
                message: format!("must not be negative, got {}", self.cap_hours),
            });
        }
        if self.summary_suffix.trim().is_empty() {
            return Err(TimesheetError::InvalidConfig {
                field: "summary_suffix".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// A holiday file from the `holidays/` directory.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The year the file covers.
    pub year: i32,
    /// The holidays of that year.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}

/// The complete calculator configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// Calculator settings.
    settings: CalculatorSettings,
    /// Public holidays from all holiday files.
    holidays: ConfiguredHolidayCalendar,
}

impl CalculatorConfig {
    /// Creates a CalculatorConfig from its component parts.
    pub fn new(settings: CalculatorSettings, holidays: Vec<PublicHoliday>) -> Self {
        Self {
            settings,
            holidays: ConfiguredHolidayCalendar::new(holidays),
        }
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &ConfiguredHolidayCalendar {
        &self.holidays
    }
}
