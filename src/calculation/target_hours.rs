//! Target (contractual) hours for a month.
//!
//! The target is the number of working days in the month, Monday to Friday
//! minus public holidays falling on those days, times the contractual hours
//! per day.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TimesheetResult;
use crate::models::{AuditStep, MonthKey};

/// The result of computing the target hours for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetHoursResult {
    /// The contractual hours for the month.
    pub hours: Decimal,
    /// Number of Monday-to-Friday days in the month.
    pub weekday_count: u32,
    /// Public holidays that fell on a weekday and were excluded.
    pub holiday_weekdays: Vec<NaiveDate>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl TargetHoursResult {
    /// Returns the number of days that count towards the target.
    pub fn working_days(&self) -> u32 {
        self.weekday_count - self.holiday_weekdays.len() as u32
    }
}

/// Computes the target hours of a month.
///
/// Every day of the month is visited; a day counts if it is a weekday and
/// not in `holidays`. Holidays on weekends have no effect.
///
/// # Arguments
///
/// * `year` - The calendar year
/// * `month` - The month number (1-12)
/// * `holidays` - Public holidays for the year and region
/// * `hours_per_day` - Contractual hours per working day
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`TimesheetError::InvalidMonth`](crate::error::TimesheetError::InvalidMonth)
/// if `month` is not between 1 and 12.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::compute_target_hours;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// // November 2023 has 22 weekdays; one holiday falls on a Wednesday.
/// let holidays: BTreeSet<_> = [NaiveDate::from_ymd_opt(2023, 11, 22).unwrap()].into();
/// let result = compute_target_hours(2023, 11, &holidays, Decimal::new(8, 0), 1).unwrap();
///
/// assert_eq!(result.weekday_count, 22);
/// assert_eq!(result.hours, Decimal::new(168, 0));
/// ```
pub fn compute_target_hours(
    year: i32,
    month: u32,
    holidays: &BTreeSet<NaiveDate>,
    hours_per_day: Decimal,
    step_number: u32,
) -> TimesheetResult<TargetHoursResult> {
    let month_key = MonthKey::new(year, month)?;

    let weekdays: Vec<NaiveDate> = month_key.weekdays().collect();
    let holiday_weekdays: Vec<NaiveDate> = weekdays
        .iter()
        .copied()
        .filter(|d| holidays.contains(d))
        .collect();

    let weekday_count = weekdays.len() as u32;
    let working_days = weekday_count - holiday_weekdays.len() as u32;
    let hours = Decimal::from(working_days) * hours_per_day;

    let audit_step = AuditStep {
        step_number,
        rule_id: "target_hours".to_string(),
        rule_name: "Monthly Target Hours".to_string(),
        input: serde_json::json!({
            "month": month_key.to_string(),
            "hours_per_day": hours_per_day.normalize().to_string(),
            "holidays_in_calendar": holidays.len()
        }),
        output: serde_json::json!({
            "weekday_count": weekday_count,
            "holiday_weekdays": holiday_weekdays.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "target_hours": hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} weekdays minus {} weekday holidays leaves {} working days at {} hours",
            weekday_count,
            holiday_weekdays.len(),
            working_days,
            hours_per_day.normalize()
        ),
    };

    Ok(TargetHoursResult {
        hours,
        weekday_count,
        holiday_weekdays,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimesheetError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_without_holidays() {
        // September 2023: 21 weekdays
        let result = compute_target_hours(2023, 9, &BTreeSet::new(), dec("8"), 1).unwrap();

        assert_eq!(result.weekday_count, 21);
        assert!(result.holiday_weekdays.is_empty());
        assert_eq!(result.hours, dec("168"));
    }

    #[test]
    fn test_thirty_day_month_22_weekdays_one_holiday() {
        // November 2023 has 30 days and 22 weekdays
        let holidays: BTreeSet<_> = [date(2023, 11, 22)].into();
        let result = compute_target_hours(2023, 11, &holidays, dec("8"), 1).unwrap();

        assert_eq!(result.weekday_count, 22);
        assert_eq!(result.working_days(), 21);
        assert_eq!(result.hours, dec("168"));
    }

    #[test]
    fn test_weekend_holiday_has_no_effect() {
        // 2023-10-01 is a Sunday
        let holidays: BTreeSet<_> = [date(2023, 10, 1)].into();
        let result = compute_target_hours(2023, 10, &holidays, dec("8"), 1).unwrap();

        assert!(result.holiday_weekdays.is_empty());
        assert_eq!(result.hours, dec("176")); // 22 weekdays
    }

    #[test]
    fn test_holidays_outside_month_ignored() {
        let holidays: BTreeSet<_> = [date(2023, 10, 3), date(2023, 12, 25)].into();
        let result = compute_target_hours(2023, 11, &holidays, dec("8"), 1).unwrap();

        assert_eq!(result.hours, dec("176"));
    }

    #[test]
    fn test_october_2023_two_weekday_holidays() {
        // 2023-10-03 (Tue) and 2023-10-31 (Tue)
        let holidays: BTreeSet<_> = [date(2023, 10, 3), date(2023, 10, 31)].into();
        let result = compute_target_hours(2023, 10, &holidays, dec("8"), 1).unwrap();

        assert_eq!(result.holiday_weekdays, vec![date(2023, 10, 3), date(2023, 10, 31)]);
        assert_eq!(result.hours, dec("160"));
    }

    #[test]
    fn test_fractional_hours_per_day() {
        let result = compute_target_hours(2023, 9, &BTreeSet::new(), dec("7.7"), 1).unwrap();
        assert_eq!(result.hours, dec("161.7"));
    }

    #[test]
    fn test_december_year_rollover() {
        // December 2023: 21 weekdays
        let result = compute_target_hours(2023, 12, &BTreeSet::new(), dec("8"), 1).unwrap();
        assert_eq!(result.weekday_count, 21);
    }

    #[test]
    fn test_invalid_month_rejected() {
        match compute_target_hours(2023, 13, &BTreeSet::new(), dec("8"), 1) {
            Err(TimesheetError::InvalidMonth { year, month }) => {
                assert_eq!(year, 2023);
                assert_eq!(month, 13);
            }
            other => panic!("Expected InvalidMonth, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_step() {
        let holidays: BTreeSet<_> = [date(2023, 10, 3)].into();
        let result = compute_target_hours(2023, 10, &holidays, dec("8"), 3).unwrap();

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "target_hours");
        assert_eq!(result.audit_step.input["month"].as_str().unwrap(), "23_10");
        assert_eq!(result.audit_step.output["target_hours"].as_str().unwrap(), "168");
        assert!(result.audit_step.reasoning.contains("22 weekdays minus 1"));
    }
}
