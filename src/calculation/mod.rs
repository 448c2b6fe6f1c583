//! Calculation logic for the Timesheet Engine.
//!
//! This module contains all the calculation functions for a month of
//! timesheet data: break parsing, daily effective hours with the daily cap
//! and overtime, monthly aggregation, target hours adjusted for public
//! holidays, absence correction for vacation and sick leave, and the
//! cross-month overtime roll-up.

mod absence_correction;
mod break_duration;
mod daily_hours;
mod monthly_totals;
mod overtime_rollup;
mod target_hours;

pub use absence_correction::{AbsenceCorrectionResult, apply_absence_correction};
pub use break_duration::{BreakParseError, parse_break_duration};
pub use daily_hours::{
    DEFAULT_DAILY_CAP_HOURS, DEFAULT_TARGET_HOURS_PER_DAY, compute_daily_results, daily_result,
};
pub use monthly_totals::{aggregate_month, net_overtime_against_target};
pub use overtime_rollup::{
    OvertimeRollup, RollupSource, apply_manual_correction, sum_overtime_across_reports,
};
pub use target_hours::{TargetHoursResult, compute_target_hours};
