//! Persisted monthly summaries.
//!
//! Each processed month leaves a small CSV file next to its timesheet with
//! the month's total effective and overtime hours. The file name is the
//! timesheet's stem followed by a fixed suffix, which is how the cross-month
//! roll-up finds them again.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};
use tracing::info;

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::MonthlySummary;

/// Default file name suffix of monthly summaries.
pub const DEFAULT_SUMMARY_SUFFIX: &str = "_monthly_totals.csv";

/// Returns where the summary for the timesheet at `input` is stored.
///
/// # Examples
///
/// ```
/// use timesheet_engine::io::{summary_path_for, DEFAULT_SUMMARY_SUFFIX};
/// use std::path::Path;
///
/// let path = summary_path_for(Path::new("/data/2023/23_09.csv"), DEFAULT_SUMMARY_SUFFIX);
/// assert_eq!(path, Path::new("/data/2023/23_09_monthly_totals.csv"));
/// ```
pub fn summary_path_for(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, suffix))
}

/// Writes a monthly summary, replacing any existing file.
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &MonthlySummary) -> TimesheetResult<()> {
    let path = path.as_ref();
    let write_error = |message: String| TimesheetError::SummaryWrite {
        path: path.display().to_string(),
        message,
    };

    let mut writer = Writer::from_path(path).map_err(|e| write_error(e.to_string()))?;
    writer
        .serialize(summary)
        .map_err(|e| write_error(e.to_string()))?;
    writer.flush().map_err(|e| write_error(e.to_string()))?;

    info!(
        path = %path.display(),
        total_effective_hours = %summary.total_effective_hours,
        total_overtime_hours = %summary.total_overtime_hours,
        "Monthly summary written"
    );
    Ok(())
}

/// Reads a monthly summary.
///
/// # Errors
///
/// Returns [`TimesheetError::SummaryRead`] if the file is missing, is not
/// valid CSV, lacks one of the two fields, or does not hold exactly one
/// data row.
pub fn read_summary<P: AsRef<Path>>(path: P) -> TimesheetResult<MonthlySummary> {
    let path = path.as_ref();
    let read_error = |message: String| TimesheetError::SummaryRead {
        path: path.display().to_string(),
        message,
    };

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| read_error(e.to_string()))?;

    let mut records = reader.deserialize::<MonthlySummary>();
    let summary = records
        .next()
        .ok_or_else(|| read_error("no data row".to_string()))?
        .map_err(|e| read_error(e.to_string()))?;

    if records.next().is_some() {
        return Err(read_error("more than one data row".to_string()));
    }

    Ok(summary)
}

/// Lists the summaries stored directly in `dir`, sorted by file name.
pub fn list_summaries<P: AsRef<Path>>(dir: P, suffix: &str) -> TimesheetResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_error = |message: String| TimesheetError::SummaryRead {
        path: dir.display().to_string(),
        message,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| read_error(e.to_string()))? {
        let path = entry.map_err(|e| read_error(e.to_string()))?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
