//! Timesheet table reading.
//!
//! Timesheets are CSV exports of a personal spreadsheet with one row per
//! block of work. Reusable sheets often carry a template block at the
//! bottom; everything from the row holding the template marker onwards is
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::ColumnNames;
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::DailyEntry;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d.%m.%y", "%d/%m/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Reads the timesheet at `path`.
///
/// # Arguments
///
/// * `path` - Location of the CSV file
/// * `columns` - Header names of the day, start, end and break columns
/// * `marker` - Template marker; the row containing it and all later rows are dropped
///
/// # Errors
///
/// Fails with [`TimesheetError::InputRead`] if the file cannot be opened or
/// is not valid CSV, [`TimesheetError::MissingColumn`] if a required column
/// is absent, and [`TimesheetError::InvalidEntry`] for rows whose dates or
/// times cannot be read or that end before they start.
pub fn read_timesheet<P: AsRef<Path>>(
    path: P,
    columns: &ColumnNames,
    marker: Option<&str>,
) -> TimesheetResult<Vec<DailyEntry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TimesheetError::InputRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    read_timesheet_from(file, &path.display().to_string(), columns, marker)
}

/// Reads a timesheet from any reader; `source` names it in errors.
///
/// # Examples
///
/// ```
/// use timesheet_engine::config::ColumnNames;
/// use timesheet_engine::io::read_timesheet_from;
///
/// let csv = "Day,Start,End,Break\n\
///            2023-09-04,08:00,16:30,00:30:00\n\
///            TEMPLATE,,,\n\
///            2023-09-05,08:00,16:30,00:30:00\n";
///
/// let entries = read_timesheet_from(
///     csv.as_bytes(),
///     "inline",
///     &ColumnNames::default(),
///     Some("TEMPLATE"),
/// )
/// .unwrap();
/// assert_eq!(entries.len(), 1);
/// ```
pub fn read_timesheet_from<R: Read>(
    reader: R,
    source: &str,
    columns: &ColumnNames,
    marker: Option<&str>,
) -> TimesheetResult<Vec<DailyEntry>> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| TimesheetError::InputRead {
            path: source.to_string(),
            message: e.to_string(),
        })?
        .clone();

    let layout = ColumnLayout::resolve(&headers, columns, source)?;
    let marker = marker.map(str::trim).filter(|m| !m.is_empty());

    let mut entries = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| TimesheetError::InputRead {
            path: source.to_string(),
            message: e.to_string(),
        })?;

        if let Some(marker) = marker {
            if record.iter().any(|field| field.contains(marker)) {
                debug!(source, row, "Template marker found, ignoring the remaining rows");
                break;
            }
        }

        if let Some(entry) = parse_row(&record, &layout, row)? {
            entries.push(entry);
        }
    }

    debug!(source, entries = entries.len(), "Timesheet read");
    Ok(entries)
}

/// Column positions resolved from the header row.
struct ColumnLayout {
    day: usize,
    start: usize,
    end: usize,
    break_duration: usize,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord, columns: &ColumnNames, source: &str) -> TimesheetResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| TimesheetError::MissingColumn {
                    path: source.to_string(),
                    column: name.to_string(),
                })
        };

        Ok(Self {
            day: find(&columns.day)?,
            start: find(&columns.start)?,
            end: find(&columns.end)?,
            break_duration: find(&columns.break_duration)?,
        })
    }
}

fn parse_row(record: &StringRecord, layout: &ColumnLayout, row: usize) -> TimesheetResult<Option<DailyEntry>> {
    let field = |idx: usize| record.get(idx).unwrap_or_default().trim();

    if record.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }

    let (day_text, start_text, end_text) = (field(layout.day), field(layout.start), field(layout.end));
    if start_text.is_empty() && end_text.is_empty() {
        debug!(row, day = day_text, "Row without start and end, skipping");
        return Ok(None);
    }
    if start_text.is_empty() || end_text.is_empty() {
        return Err(invalid(row, "start and end must both be filled in"));
    }

    let day = if day_text.is_empty() {
        None
    } else {
        Some(parse_day(day_text).ok_or_else(|| invalid(row, format!("'{}' is not a date", day_text)))?)
    };

    let start = parse_timestamp(start_text, day)
        .ok_or_else(|| invalid(row, format!("start '{}' is not a timestamp", start_text)))?;
    let end = parse_timestamp(end_text, day.or(Some(start.date())))
        .ok_or_else(|| invalid(row, format!("end '{}' is not a timestamp", end_text)))?;

    let entry = DailyEntry {
        day: day.unwrap_or(start.date()),
        start,
        end,
        break_text: field(layout.break_duration).to_string(),
    };
    entry.validate(row)?;

    Ok(Some(entry))
}

fn parse_day(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .or_else(|| parse_datetime(text).map(|dt| dt.date()))
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
}

/// Parses a full timestamp, or a bare time of day placed on `day`.
fn parse_timestamp(text: &str, day: Option<NaiveDate>) -> Option<NaiveDateTime> {
    parse_datetime(text).or_else(|| {
        let day = day?;
        TIME_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(text, f).ok())
            .map(|time| day.and_time(time))
    })
}

fn invalid(row: usize, message: impl Into<String>) -> TimesheetError {
    TimesheetError::InvalidEntry {
        row,
        message: message.into(),
    }
}
