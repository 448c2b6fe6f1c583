//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reading timesheets,
//! loading configuration and persisting monthly summaries.

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// Only fatal conditions are represented here. Recoverable problems such as
/// an unparseable break value are reported as [`AuditWarning`]s instead.
///
/// [`AuditWarning`]: crate::models::AuditWarning
///
/// # Example
///
/// ```
/// use timesheet_engine::error::TimesheetError;
///
/// let error = TimesheetError::ConfigNotFound {
///     path: "/missing/calculator.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/calculator.yaml");
/// ```
#[derive(Debug, Error)]
pub enum TimesheetError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value that cannot be used.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The timesheet table could not be opened or decoded.
    #[error("Failed to read timesheet '{path}': {message}")]
    InputRead {
        /// The path of the timesheet.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// A required column is missing from the timesheet header.
    #[error("Timesheet '{path}' has no '{column}' column")]
    MissingColumn {
        /// The path of the timesheet.
        path: String,
        /// The expected column name.
        column: String,
    },

    /// A row of the timesheet holds data that cannot be interpreted.
    #[error("Invalid entry in row {row}: {message}")]
    InvalidEntry {
        /// The 1-based data row (header excluded).
        row: usize,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A file name does not follow the `YY_MM` convention.
    #[error("Cannot derive year and month from file name '{name}'")]
    InvalidFileName {
        /// The file stem that failed to parse.
        name: String,
    },

    /// A monthly summary could not be read.
    #[error("Failed to read monthly summary '{path}': {message}")]
    SummaryRead {
        /// The path of the summary.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// A monthly summary could not be written.
    #[error("Failed to write monthly summary '{path}': {message}")]
    SummaryWrite {
        /// The path of the summary.
        path: String,
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return TimesheetError.
pub type TimesheetResult<T> = Result<T, TimesheetError>;
