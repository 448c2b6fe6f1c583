//! Monthly report models.
//!
//! This module contains the persisted [`MonthlySummary`] record and the
//! [`MonthlyReport`] returned by a full month run.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, DailyResults, MonthKey, MonthlyTotals};

/// The two values persisted for each processed month.
///
/// Decimals are written as strings so a summary reads back exactly as it was
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Total effective hours of the month.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_effective_hours: Decimal,
    /// Total overtime hours of the month.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_overtime_hours: Decimal,
}

impl From<MonthlyTotals> for MonthlySummary {
    fn from(totals: MonthlyTotals) -> Self {
        Self {
            total_effective_hours: totals.total_effective_hours,
            total_overtime_hours: totals.total_overtime_hours,
        }
    }
}

impl From<MonthlySummary> for MonthlyTotals {
    fn from(summary: MonthlySummary) -> Self {
        MonthlyTotals::new(summary.total_effective_hours, summary.total_overtime_hours)
    }
}

/// Everything computed for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The month the report covers.
    pub month: MonthKey,
    /// Per-day results.
    pub daily: DailyResults,
    /// Monthly totals of effective and overtime hours.
    pub totals: MonthlyTotals,
    /// Target hours after holidays (and absences, when enabled).
    pub target_hours: Decimal,
    /// Total effective hours above the target, never negative.
    pub net_overtime: Decimal,
    /// Where the monthly summary was written, if it was.
    pub summary_path: Option<PathBuf>,
    /// Steps and warnings collected while building the report.
    pub audit_trace: AuditTrace,
}
