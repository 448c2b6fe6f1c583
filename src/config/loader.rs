//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use chrono::Datelike;
use tracing::debug;

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::PublicHoliday;

use super::types::{CalculatorConfig, CalculatorSettings, HolidayFile};

/// Loads and provides access to calculator configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── calculator.yaml   # Settings and absence periods
/// └── holidays/         # Optional
///     ├── 2023.yaml     # Public holidays of one year
///     └── 2024.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Region: {}", loader.settings().region);
/// # Ok::<(), timesheet_engine::error::TimesheetError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `calculator.yaml` is missing
    /// - Any file contains invalid YAML
    /// - A holiday file lists a holiday outside the year it declares
    /// - A setting has an unusable value
    pub fn load<P: AsRef<Path>>(path: P) -> TimesheetResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<CalculatorSettings>(&path.join("calculator.yaml"))?;
        settings.validate()?;

        let holidays = Self::load_holidays(&path.join("holidays"))?;
        debug!(
            region = %settings.region,
            holidays = holidays.len(),
            absences = settings.absences.len(),
            "Configuration loaded"
        );

        Ok(Self {
            config: CalculatorConfig::new(settings, holidays),
        })
    }

    /// Creates a loader from already-built settings and holidays.
    pub fn from_parts(settings: CalculatorSettings, holidays: Vec<PublicHoliday>) -> TimesheetResult<Self> {
        settings.validate()?;
        Ok(Self {
            config: CalculatorConfig::new(settings, holidays),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> TimesheetResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TimesheetError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| TimesheetError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all holiday files; a missing directory means no holidays.
    fn load_holidays(holidays_dir: &Path) -> TimesheetResult<Vec<PublicHoliday>> {
        if !holidays_dir.exists() {
            return Ok(Vec::new());
        }

        let dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| TimesheetError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut holidays = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| TimesheetError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                continue;
            }

            let file = Self::load_yaml::<HolidayFile>(&path)?;
            if let Some(stray) = file.holidays.iter().find(|h| h.date.year() != file.year) {
                return Err(TimesheetError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("holiday {} is not in year {}", stray.date, file.year),
                });
            }
            holidays.extend(file.holidays);
        }

        Ok(holidays)
    }

    /// Returns the underlying calculator configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &CalculatorSettings {
        self.config.settings()
    }
}
