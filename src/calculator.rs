//! The timesheet calculator.
//!
//! [`TimesheetCalculator`] ties the calculation functions to one set of
//! settings and a holiday calendar, and runs the full monthly pipeline:
//! read the timesheet, compute daily and monthly hours, work out the target,
//! and persist the monthly summary for later roll-ups.

use std::path::Path;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{
    AbsenceCorrectionResult, OvertimeRollup, TargetHoursResult, aggregate_month,
    apply_absence_correction, compute_daily_results, compute_target_hours,
    net_overtime_against_target, sum_overtime_across_reports,
};
use crate::config::{CalculatorSettings, ConfigLoader};
use crate::error::{TimesheetError, TimesheetResult};
use crate::io::{read_timesheet, summary_path_for, write_summary};
use crate::models::{
    AuditStep, AuditTrace, ConfiguredHolidayCalendar, DailyEntry, DailyResults, HolidayCalendar,
    MonthKey, MonthlyReport, MonthlySummary, MonthlyTotals,
};

/// Computes working hours, overtime and target hours for single months.
///
/// The calculator is stateless apart from its configuration; every method
/// works on the inputs it is given.
///
/// # Example
///
/// ```
/// use timesheet_engine::TimesheetCalculator;
/// use timesheet_engine::config::CalculatorSettings;
/// use timesheet_engine::models::{ConfiguredHolidayCalendar, DailyEntry, MonthKey};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let calculator = TimesheetCalculator::new(
///     CalculatorSettings::for_region("TH"),
///     ConfiguredHolidayCalendar::default(),
/// )
/// .unwrap();
///
/// let entries = vec![DailyEntry {
///     day: NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
///     start: NaiveDateTime::parse_from_str("2023-09-04 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2023-09-04 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     break_text: "00:30:00".to_string(),
/// }];
///
/// let report = calculator
///     .calculate_month(MonthKey::new(2023, 9).unwrap(), &entries)
///     .unwrap();
/// assert_eq!(report.totals.total_effective_hours, Decimal::new(85, 1));
/// assert_eq!(report.target_hours, Decimal::new(168, 0));
/// ```
#[derive(Debug, Clone)]
pub struct TimesheetCalculator<C = ConfiguredHolidayCalendar> {
    settings: CalculatorSettings,
    calendar: C,
}

impl TimesheetCalculator<ConfiguredHolidayCalendar> {
    /// Creates a calculator from loaded configuration.
    pub fn from_config(loader: &ConfigLoader) -> Self {
        Self {
            settings: loader.settings().clone(),
            calendar: loader.config().holidays().clone(),
        }
    }
}

impl<C: HolidayCalendar> TimesheetCalculator<C> {
    /// Creates a calculator with any holiday calendar.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetError::InvalidConfig`] if the settings are unusable.
    pub fn new(settings: CalculatorSettings, calendar: C) -> TimesheetResult<Self> {
        settings.validate()?;
        Ok(Self { settings, calendar })
    }

    /// Returns the settings the calculator was built with.
    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Reads the timesheet at `path` using the configured columns and marker.
    pub fn read_entries<P: AsRef<Path>>(&self, path: P) -> TimesheetResult<Vec<DailyEntry>> {
        read_timesheet(
            path,
            &self.settings.columns,
            self.settings.template_marker.as_deref(),
        )
    }

    /// Computes per-day results with the configured target and cap.
    pub fn daily_results(&self, entries: &[DailyEntry]) -> DailyResults {
        compute_daily_results(entries, self.settings.hours_per_day, self.settings.cap_hours)
    }

    /// Sums daily results into monthly totals.
    pub fn monthly_totals(&self, daily: &DailyResults) -> MonthlyTotals {
        aggregate_month(daily.iter())
    }

    /// Computes the month's target hours from the configured region's holidays.
    pub fn target_hours(&self, month: MonthKey, step_number: u32) -> TimesheetResult<TargetHoursResult> {
        let holidays = self.calendar.holidays(month.year, &self.settings.region);
        compute_target_hours(
            month.year,
            month.month,
            &holidays,
            self.settings.hours_per_day,
            step_number,
        )
    }

    /// Applies the configured absence periods to a target.
    pub fn absence_correction(
        &self,
        month: MonthKey,
        target_hours: Decimal,
        step_number: u32,
    ) -> TimesheetResult<AbsenceCorrectionResult> {
        apply_absence_correction(
            target_hours,
            &self.settings.absences,
            month.year,
            month.month,
            self.settings.hours_per_day,
            self.settings.absence_matching,
            step_number,
        )
    }

    /// Computes the full report for a month from already-read entries.
    ///
    /// Entries booked outside `month` are still counted; the timesheet is
    /// trusted to belong to the month it is named after.
    pub fn calculate_month(&self, month: MonthKey, entries: &[DailyEntry]) -> TimesheetResult<MonthlyReport> {
        let start_time = Instant::now();
        let mut steps: Vec<AuditStep> = Vec::new();

        let daily = self.daily_results(entries);
        let totals = self.monthly_totals(&daily);
        steps.push(totals_step(1, &daily, &totals));

        let target = self.target_hours(month, 2)?;
        let mut target_hours = target.hours;
        steps.push(target.audit_step);

        if self.settings.apply_absence_correction {
            let correction = self.absence_correction(month, target_hours, 3)?;
            target_hours = correction.corrected_hours;
            steps.push(correction.audit_step);
        }

        let net_overtime = net_overtime_against_target(totals.total_effective_hours, target_hours);
        let warnings = daily.warnings.clone();

        Ok(MonthlyReport {
            month,
            daily,
            totals,
            target_hours,
            net_overtime,
            summary_path: None,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us: start_time.elapsed().as_micros() as u64,
            },
        })
    }

    /// Runs the whole pipeline for the timesheet at `input_path`.
    ///
    /// The month is taken from the file name (`YY_MM...`). On success the
    /// monthly summary is written next to the input, named with the
    /// configured suffix. Nothing is written if any step fails.
    pub fn process_month<P: AsRef<Path>>(&self, input_path: P) -> TimesheetResult<MonthlyReport> {
        let input_path = input_path.as_ref();

        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| TimesheetError::InvalidFileName {
                name: input_path.display().to_string(),
            })?;
        let month = MonthKey::from_file_stem(stem)?;

        let entries = self.read_entries(input_path)?;
        let mut report = self.calculate_month(month, &entries)?;

        let summary_path = summary_path_for(input_path, &self.settings.summary_suffix);
        write_summary(&summary_path, &MonthlySummary::from(report.totals))?;
        report.summary_path = Some(summary_path);

        if !report.audit_trace.warnings.is_empty() {
            warn!(
                month = %month,
                warnings = report.audit_trace.warnings.len(),
                "Month processed with warnings"
            );
        }
        info!(
            month = %month,
            days = report.daily.len(),
            total_effective_hours = %report.totals.total_effective_hours,
            total_overtime_hours = %report.totals.total_overtime_hours,
            target_hours = %report.target_hours,
            duration_us = report.audit_trace.duration_us,
            "Month processed"
        );

        Ok(report)
    }

    /// Sums overtime over all monthly summaries at `locations`.
    pub fn rollup_overtime<P: AsRef<Path>>(&self, locations: &[P]) -> OvertimeRollup {
        sum_overtime_across_reports(locations, &self.settings.summary_suffix)
    }
}

fn totals_step(step_number: u32, daily: &DailyResults, totals: &MonthlyTotals) -> AuditStep {
    let capped_days = daily.iter().filter(|d| d.was_capped()).count();
    AuditStep {
        step_number,
        rule_id: "monthly_totals".to_string(),
        rule_name: "Monthly Totals".to_string(),
        input: serde_json::json!({
            "days": daily.len(),
            "capped_days": capped_days
        }),
        output: serde_json::json!({
            "total_effective_hours": totals.total_effective_hours.normalize().to_string(),
            "total_overtime_hours": totals.total_overtime_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} days summed, {} of them limited by the daily cap",
            daily.len(),
            capped_days
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AbsenceKind, AbsenceMatching, AbsencePeriod, PublicHoliday, WARN_BREAK_UNPARSEABLE,
    };
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_entry(day: NaiveDate, start: &str, end: &str, break_text: &str) -> DailyEntry {
        let at = |time: &str| {
            NaiveDateTime::parse_from_str(&format!("{} {}", day, time), "%Y-%m-%d %H:%M").unwrap()
        };
        DailyEntry {
            day,
            start: at(start),
            end: at(end),
            break_text: break_text.to_string(),
        }
    }

    fn october_calendar() -> ConfiguredHolidayCalendar {
        ConfiguredHolidayCalendar::new(vec![
            PublicHoliday {
                date: date(2023, 10, 3),
                name: "Day of German Unity".to_string(),
                region: "national".to_string(),
            },
            PublicHoliday {
                date: date(2023, 10, 31),
                name: "Reformation Day".to_string(),
                region: "TH".to_string(),
            },
        ])
    }

    fn calculator(settings: CalculatorSettings) -> TimesheetCalculator {
        TimesheetCalculator::new(settings, october_calendar()).unwrap()
    }

    #[test]
    fn test_target_hours_uses_region() {
        let th = calculator(CalculatorSettings::for_region("TH"));
        let by = calculator(CalculatorSettings::for_region("BY"));
        let october = MonthKey::new(2023, 10).unwrap();

        assert_eq!(th.target_hours(october, 1).unwrap().hours, dec("160"));
        assert_eq!(by.target_hours(october, 1).unwrap().hours, dec("168"));
    }

    #[test]
    fn test_calculate_month_without_absence_correction() {
        let mut settings = CalculatorSettings::for_region("TH");
        settings.absences = vec![AbsencePeriod {
            start: date(2023, 10, 9),
            end: date(2023, 10, 13),
            kind: AbsenceKind::Vacation,
        }];
        let calc = calculator(settings);

        let entries = vec![
            make_entry(date(2023, 10, 2), "07:00", "19:00", "00:30:00"),
            make_entry(date(2023, 10, 4), "08:00", "15:00", "lunch"),
        ];
        let report = calc.calculate_month(MonthKey::new(2023, 10).unwrap(), &entries).unwrap();

        assert_eq!(report.totals.total_effective_hours, dec("18.5"));
        assert_eq!(report.totals.total_overtime_hours, dec("1")); // 2 + (7 - 8)
        assert_eq!(report.target_hours, dec("160"));
        assert_eq!(report.net_overtime, Decimal::ZERO);
        assert_eq!(report.audit_trace.steps.len(), 2);
        assert!(report.audit_trace.has_warning(WARN_BREAK_UNPARSEABLE));
        assert!(report.summary_path.is_none());
    }

    #[test]
    fn test_calculate_month_with_absence_correction() {
        let mut settings = CalculatorSettings::for_region("TH");
        settings.apply_absence_correction = true;
        settings.absence_matching = AbsenceMatching::Overlap;
        settings.absences = vec![AbsencePeriod {
            start: date(2023, 10, 9),
            end: date(2023, 10, 13),
            kind: AbsenceKind::Vacation,
        }];
        let calc = calculator(settings);

        let report = calc.calculate_month(MonthKey::new(2023, 10).unwrap(), &[]).unwrap();

        assert_eq!(report.target_hours, dec("120"));
        let rule_ids: Vec<_> = report.audit_trace.steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(rule_ids, vec!["monthly_totals", "target_hours", "absence_correction"]);
    }

    #[test]
    fn test_net_overtime_when_above_target() {
        let mut settings = CalculatorSettings::for_region("TH");
        settings.apply_absence_correction = true;
        settings.absences = vec![AbsencePeriod {
            start: date(2023, 10, 1),
            end: date(2023, 10, 31),
            kind: AbsenceKind::Sick,
        }];
        let calc = calculator(settings);

        let entries = vec![make_entry(date(2023, 10, 2), "08:00", "12:00", "")];
        let report = calc.calculate_month(MonthKey::new(2023, 10).unwrap(), &entries).unwrap();

        assert_eq!(report.target_hours, Decimal::ZERO);
        assert_eq!(report.net_overtime, dec("4"));
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let mut settings = CalculatorSettings::for_region("TH");
        settings.hours_per_day = dec("-8");
        assert!(TimesheetCalculator::new(settings, october_calendar()).is_err());
    }

    #[test]
    fn test_process_month_rejects_badly_named_file() {
        let calc = calculator(CalculatorSettings::for_region("TH"));
        assert!(matches!(
            calc.process_month("/tmp/timesheet.csv"),
            Err(TimesheetError::InvalidFileName { .. })
        ));
    }
}
