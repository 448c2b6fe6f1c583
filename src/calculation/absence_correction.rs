//! Vacation and sick leave correction of target hours.
//!
//! Days taken off reduce the month's target by the contractual hours of each
//! absent weekday. The corrected target never drops below zero.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TimesheetResult;
use crate::models::{AbsenceMatching, AbsencePeriod, AuditStep, MonthKey, is_weekday};

/// The result of applying absence periods to a month's target hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceCorrectionResult {
    /// The target hours after the correction, never negative.
    pub corrected_hours: Decimal,
    /// Distinct weekdays of the month covered by a matching period.
    pub absence_days: Vec<NaiveDate>,
    /// Hours removed from the target before flooring at zero.
    pub deducted_hours: Decimal,
    /// The audit step recording this correction.
    pub audit_step: AuditStep,
}

/// Reduces target hours by the absent weekdays of a month.
///
/// Periods are selected with `matching`, expanded to individual days, and
/// reduced to the weekdays lying inside the month. Overlapping periods count
/// each day once.
///
/// # Arguments
///
/// * `target_hours` - The uncorrected target for the month
/// * `periods` - Vacation and sick leave periods
/// * `year` - The calendar year
/// * `month` - The month number (1-12)
/// * `hours_per_day` - Contractual hours per absent weekday
/// * `matching` - How periods are matched against the month
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::apply_absence_correction;
/// use timesheet_engine::models::{AbsenceKind, AbsenceMatching, AbsencePeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Wednesday to Friday
/// let vacation = AbsencePeriod {
///     start: NaiveDate::from_ymd_opt(2023, 11, 8).unwrap(),
///     end: NaiveDate::from_ymd_opt(2023, 11, 10).unwrap(),
///     kind: AbsenceKind::Vacation,
/// };
///
/// let result = apply_absence_correction(
///     Decimal::new(168, 0),
///     &[vacation],
///     2023,
///     11,
///     Decimal::new(8, 0),
///     AbsenceMatching::Overlap,
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.corrected_hours, Decimal::new(144, 0));
/// ```
pub fn apply_absence_correction(
    target_hours: Decimal,
    periods: &[AbsencePeriod],
    year: i32,
    month: u32,
    hours_per_day: Decimal,
    matching: AbsenceMatching,
    step_number: u32,
) -> TimesheetResult<AbsenceCorrectionResult> {
    let month_key = MonthKey::new(year, month)?;

    let matched: Vec<&AbsencePeriod> = periods
        .iter()
        .filter(|p| p.matches_month(year, month, matching))
        .collect();

    let absence_days: BTreeSet<NaiveDate> = matched
        .iter()
        .flat_map(|p| p.days())
        .filter(|d| month_key.contains(*d) && is_weekday(*d))
        .collect();

    let deducted_hours = Decimal::from(absence_days.len() as u64) * hours_per_day;
    let corrected_hours = (target_hours - deducted_hours).max(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "absence_correction".to_string(),
        rule_name: "Absence Correction".to_string(),
        input: serde_json::json!({
            "month": month_key.to_string(),
            "target_hours": target_hours.normalize().to_string(),
            "periods": periods.len(),
            "matching": matching
        }),
        output: serde_json::json!({
            "matched_periods": matched.len(),
            "absence_days": absence_days.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "corrected_hours": corrected_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} absent weekdays at {} hours reduce the target from {} to {}",
            absence_days.len(),
            hours_per_day.normalize(),
            target_hours.normalize(),
            corrected_hours.normalize()
        ),
    };

    Ok(AbsenceCorrectionResult {
        corrected_hours,
        absence_days: absence_days.into_iter().collect(),
        deducted_hours,
        audit_step,
    })
}
