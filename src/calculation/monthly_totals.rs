//! Monthly aggregation of daily results.

use rust_decimal::Decimal;

use crate::models::{DailyResult, MonthlyTotals};

/// Sums effective and overtime hours over a set of daily results.
///
/// Accepts anything that yields `&DailyResult`, so both a full
/// [`DailyResults`](crate::models::DailyResults) iterator and a filtered
/// subset of days can be aggregated. Empty input yields zero totals.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::aggregate_month;
/// use timesheet_engine::models::{DailyResult, MonthlyTotals};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let days = vec![
///     DailyResult {
///         day: NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
///         effective_hours: Decimal::new(11, 0),
///         capped_hours: Decimal::new(10, 0),
///         overtime_hours: Decimal::new(2, 0),
///     },
///     DailyResult {
///         day: NaiveDate::from_ymd_opt(2023, 9, 5).unwrap(),
///         effective_hours: Decimal::new(7, 0),
///         capped_hours: Decimal::new(7, 0),
///         overtime_hours: Decimal::new(-1, 0),
///     },
/// ];
///
/// let totals = aggregate_month(&days);
/// assert_eq!(totals.total_effective_hours, Decimal::new(18, 0));
/// assert_eq!(totals.total_overtime_hours, Decimal::new(1, 0));
///
/// assert_eq!(aggregate_month(&[]), MonthlyTotals::default());
/// ```
pub fn aggregate_month<'a, I>(days: I) -> MonthlyTotals
where
    I: IntoIterator<Item = &'a DailyResult>,
{
    days.into_iter().sum()
}

/// Returns how far the month's effective hours exceed its target.
///
/// The balance never goes below zero: a month under target has no
/// overtime rather than negative overtime.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::net_overtime_against_target;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     net_overtime_against_target(Decimal::new(172, 0), Decimal::new(168, 0)),
///     Decimal::new(4, 0)
/// );
/// assert_eq!(
///     net_overtime_against_target(Decimal::new(150, 0), Decimal::new(168, 0)),
///     Decimal::ZERO
/// );
/// ```
pub fn net_overtime_against_target(total_effective_hours: Decimal, target_hours: Decimal) -> Decimal {
    (total_effective_hours - target_hours).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_result(day: u32, effective: &str, overtime: &str) -> DailyResult {
        let effective = dec(effective);
        DailyResult {
            day: NaiveDate::from_ymd_opt(2023, 9, day).unwrap(),
            effective_hours: effective,
            capped_hours: effective.min(dec("10")),
            overtime_hours: dec(overtime),
        }
    }

    #[test]
    fn test_empty_month_is_zero() {
        let totals = aggregate_month(std::iter::empty());
        assert_eq!(totals.total_effective_hours, Decimal::ZERO);
        assert_eq!(totals.total_overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_totals_include_uncapped_effective_hours() {
        let days = [make_result(4, "12", "2"), make_result(5, "8", "0")];
        let totals = aggregate_month(&days);

        assert_eq!(totals.total_effective_hours, dec("20"));
        assert_eq!(totals.total_overtime_hours, dec("2"));
    }

    #[test]
    fn test_negative_overtime_reduces_total() {
        let days = [make_result(4, "10", "2"), make_result(5, "5.5", "-2.5")];
        let totals = aggregate_month(&days);

        assert_eq!(totals.total_overtime_hours, dec("-0.5"));
    }

    #[test]
    fn test_aggregation_splits_over_disjoint_days() {
        let first = [make_result(4, "9", "1"), make_result(5, "7", "-1")];
        let second = [make_result(6, "10.5", "2"), make_result(7, "8.25", "0.25")];

        let combined = aggregate_month(first.iter().chain(second.iter()));
        assert_eq!(combined, aggregate_month(&first) + aggregate_month(&second));
    }

    #[test]
    fn test_net_overtime_exact_target() {
        assert_eq!(net_overtime_against_target(dec("168"), dec("168")), Decimal::ZERO);
    }

    #[test]
    fn test_net_overtime_fractional() {
        assert_eq!(net_overtime_against_target(dec("170.75"), dec("168")), dec("2.75"));
    }
}
