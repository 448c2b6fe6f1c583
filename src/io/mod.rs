//! File input and output for timesheets and monthly summaries.
//!
//! Timesheets are read from CSV exports; monthly summaries are written and
//! read back as two-column CSV files so later runs can roll overtime up
//! across months.

mod summary_store;
mod timesheet_reader;

pub use summary_store::{
    DEFAULT_SUMMARY_SUFFIX, list_summaries, read_summary, summary_path_for, write_summary,
};
pub use timesheet_reader::{read_timesheet, read_timesheet_from};
