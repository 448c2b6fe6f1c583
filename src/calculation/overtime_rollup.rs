//! Cross-month overtime roll-up and manual correction.
//!
//! Overtime carried over from earlier months is rebuilt on demand by
//! summing the overtime field of every persisted monthly summary. A summary
//! that cannot be read is skipped with a warning rather than failing the
//! whole roll-up.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::io::{list_summaries, read_summary};
use crate::models::{AuditWarning, WARN_SUMMARY_SKIPPED, WarningSeverity};

/// One monthly summary that contributed to a roll-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupSource {
    /// Where the summary was read from.
    pub path: PathBuf,
    /// The overtime it contributed.
    pub overtime_hours: Decimal,
}

/// Overtime accumulated over previously processed months.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRollup {
    /// Sum of the overtime of every readable summary.
    pub total_overtime: Decimal,
    /// The summaries that were read, in reading order.
    pub sources: Vec<RollupSource>,
    /// Sources that were skipped and why.
    pub warnings: Vec<AuditWarning>,
}

impl OvertimeRollup {
    fn add(&mut self, path: PathBuf, overtime_hours: Decimal) {
        self.total_overtime += overtime_hours;
        self.sources.push(RollupSource {
            path,
            overtime_hours,
        });
    }

    fn skip(&mut self, path: &Path, reason: impl std::fmt::Display) {
        warn!(path = %path.display(), error = %reason, "Skipping monthly summary");
        self.warnings.push(AuditWarning::new(
            WARN_SUMMARY_SKIPPED,
            WarningSeverity::High,
            format!("{}: {}", path.display(), reason),
        ));
    }
}

/// Sums the overtime of every monthly summary found at `locations`.
///
/// A location that is a directory is scanned (non-recursively) for files
/// whose names end in `suffix`; any other location is read as a summary
/// file itself. Unreadable directories and summaries contribute zero and
/// are reported in [`OvertimeRollup::warnings`].
///
/// # Arguments
///
/// * `locations` - Summary files and/or directories holding them
/// * `suffix` - File name suffix identifying summaries in a directory
pub fn sum_overtime_across_reports<P: AsRef<Path>>(locations: &[P], suffix: &str) -> OvertimeRollup {
    let mut rollup = OvertimeRollup::default();

    for location in locations {
        let location = location.as_ref();

        let files = if location.is_dir() {
            match list_summaries(location, suffix) {
                Ok(files) => files,
                Err(err) => {
                    rollup.skip(location, err);
                    continue;
                }
            }
        } else {
            vec![location.to_path_buf()]
        };

        for file in files {
            match read_summary(&file) {
                Ok(summary) => rollup.add(file, summary.total_overtime_hours),
                Err(err) => rollup.skip(&file, err),
            }
        }
    }

    info!(
        sources = rollup.sources.len(),
        skipped = rollup.warnings.len(),
        total_overtime = %rollup.total_overtime,
        "Overtime rolled up across months"
    );
    rollup
}

/// Adjusts an overtime balance by hand, never going below zero.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::apply_manual_correction;
/// use rust_decimal::Decimal;
///
/// assert_eq!(apply_manual_correction(Decimal::new(10, 0), Decimal::new(4, 0)), Decimal::new(14, 0));
/// assert_eq!(apply_manual_correction(Decimal::new(10, 0), Decimal::new(-15, 0)), Decimal::ZERO);
/// ```
pub fn apply_manual_correction(previous_total: Decimal, delta: Decimal) -> Decimal {
    (previous_total + delta).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{DEFAULT_SUMMARY_SUFFIX, write_summary};
    use crate::models::MonthlySummary;
    use std::fs;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write(dir: &Path, name: &str, overtime: &str) -> PathBuf {
        let path = dir.join(name);
        write_summary(
            &path,
            &MonthlySummary {
                total_effective_hours: dec("160"),
                total_overtime_hours: dec(overtime),
            },
        )
        .unwrap();
        path
    }

    #[test]
    fn test_sums_directory_of_summaries() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "23_07_monthly_totals.csv", "5");
        write(temp.path(), "23_08_monthly_totals.csv", "-2");
        write(temp.path(), "23_09_monthly_totals.csv", "3");

        let rollup = sum_overtime_across_reports(&[temp.path()], DEFAULT_SUMMARY_SUFFIX);

        assert_eq!(rollup.total_overtime, dec("6"));
        assert_eq!(rollup.sources.len(), 3);
        assert!(rollup.warnings.is_empty());
    }

    #[test]
    fn test_unreadable_summary_skipped_with_warning() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "23_07_monthly_totals.csv", "5");
        write(temp.path(), "23_08_monthly_totals.csv", "-2");
        write(temp.path(), "23_09_monthly_totals.csv", "3");
        fs::write(temp.path().join("23_10_monthly_totals.csv"), "garbage").unwrap();

        let rollup = sum_overtime_across_reports(&[temp.path()], DEFAULT_SUMMARY_SUFFIX);

        assert_eq!(rollup.total_overtime, dec("6"));
        assert_eq!(rollup.sources.len(), 3);
        assert_eq!(rollup.warnings.len(), 1);
        assert_eq!(rollup.warnings[0].code, WARN_SUMMARY_SKIPPED);
        assert_eq!(rollup.warnings[0].severity, WarningSeverity::High);
        assert!(rollup.warnings[0].message.contains("23_10_monthly_totals.csv"));
    }

    #[test]
    fn test_explicit_files_and_missing_locations() {
        let temp = TempDir::new().unwrap();
        let july = write(temp.path(), "23_07_monthly_totals.csv", "1.5");
        let missing = temp.path().join("does_not_exist.csv");

        let rollup = sum_overtime_across_reports(&[july.clone(), missing], DEFAULT_SUMMARY_SUFFIX);

        assert_eq!(rollup.total_overtime, dec("1.5"));
        assert_eq!(rollup.sources[0].path, july);
        assert_eq!(rollup.warnings.len(), 1);
    }

    #[test]
    fn test_multiple_directories() {
        let y2023 = TempDir::new().unwrap();
        let y2024 = TempDir::new().unwrap();
        write(y2023.path(), "23_12_monthly_totals.csv", "4.25");
        write(y2024.path(), "24_01_monthly_totals.csv", "0.75");

        let rollup = sum_overtime_across_reports(&[y2023.path(), y2024.path()], DEFAULT_SUMMARY_SUFFIX);
        assert_eq!(rollup.total_overtime, dec("5"));
    }

    #[test]
    fn test_no_locations_is_zero() {
        let rollup = sum_overtime_across_reports::<&Path>(&[], DEFAULT_SUMMARY_SUFFIX);
        assert_eq!(rollup.total_overtime, Decimal::ZERO);
        assert!(rollup.sources.is_empty());
    }

    #[test]
    fn test_manual_correction() {
        assert_eq!(apply_manual_correction(dec("10"), dec("-15")), Decimal::ZERO);
        assert_eq!(apply_manual_correction(dec("10"), dec("-10")), Decimal::ZERO);
        assert_eq!(apply_manual_correction(dec("10"), dec("2.5")), dec("12.5"));
        assert_eq!(apply_manual_correction(dec("-3"), dec("5")), dec("2"));
    }
}
