//! Configuration loading and management for the Timesheet Engine.
//!
//! This module provides functionality to load calculator settings and
//! public holiday calendars from YAML files, replacing hard-coded paths,
//! regions and hour limits.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Hours per day: {}", config.settings().hours_per_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculatorConfig, CalculatorSettings, ColumnNames, DEFAULT_TEMPLATE_MARKER, HolidayFile,
};
