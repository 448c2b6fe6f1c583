//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence;
mod audit;
mod daily_result;
mod entry;
mod holiday;
mod month;
mod report;

pub use absence::{AbsenceKind, AbsenceMatching, AbsencePeriod};
pub use audit::{
    AuditStep, AuditTrace, AuditWarning, WARN_BREAK_EXCEEDS_SPAN, WARN_BREAK_UNPARSEABLE,
    WARN_SUMMARY_SKIPPED, WarningSeverity,
};
pub use daily_result::{DailyResult, DailyResults, MonthlyTotals};
pub use entry::DailyEntry;
pub use holiday::{ConfiguredHolidayCalendar, HolidayCalendar, NATIONAL_REGION, PublicHoliday};
pub use month::{MonthKey, is_weekday};
pub use report::{MonthlyReport, MonthlySummary};
