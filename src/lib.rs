//! Timesheet Engine
//!
//! This crate computes monthly working hours from personal timesheets:
//! effective hours per day after breaks, a daily cap with overtime against a
//! daily target, monthly totals, target hours adjusted for regional public
//! holidays and absences, and an overtime roll-up across months.
//!
//! The usual entry point is [`TimesheetCalculator::process_month`], which
//! reads a `YY_MM` timesheet file, computes the [`models::MonthlyReport`]
//! and writes the monthly summary next to the input.

#![warn(missing_docs)]

pub mod calculation;
pub mod calculator;
pub mod config;
pub mod error;
pub mod io;
pub mod models;

pub use calculator::TimesheetCalculator;
