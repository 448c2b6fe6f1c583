//! Property tests for the calculation functions.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use timesheet_engine::calculation::{
    DEFAULT_DAILY_CAP_HOURS, DEFAULT_TARGET_HOURS_PER_DAY, aggregate_month,
    apply_absence_correction, apply_manual_correction, compute_daily_results,
    compute_target_hours, parse_break_duration,
};
use timesheet_engine::models::{AbsenceKind, AbsenceMatching, AbsencePeriod, DailyEntry};

fn september(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 9, day).unwrap()
}

/// An entry starting at 06:00 on a September day, lasting `span_quarters`
/// quarter hours with a break of `break_quarters` quarter hours.
fn make_entry(day: u32, span_quarters: i64, break_quarters: i64) -> DailyEntry {
    let start = september(day).and_hms_opt(6, 0, 0).unwrap();
    DailyEntry {
        day: september(day),
        start,
        end: start + Duration::minutes(span_quarters * 15),
        break_text: format!("{}min", break_quarters * 15),
    }
}

fn entry_strategy() -> impl Strategy<Value = DailyEntry> {
    (1u32..=30, 0i64..=64)
        .prop_flat_map(|(day, span)| (Just(day), Just(span), 0i64..=span))
        .prop_map(|(day, span, brk)| make_entry(day, span, brk))
}

proptest! {
    #[test]
    fn effective_hours_are_span_minus_break(span in 0i64..=64, brk_share in 0i64..=100) {
        let brk = span * brk_share / 100;
        let results = compute_daily_results(
            &[make_entry(4, span, brk)],
            DEFAULT_TARGET_HOURS_PER_DAY,
            DEFAULT_DAILY_CAP_HOURS,
        );

        let day = results.get(september(4)).unwrap();
        prop_assert_eq!(day.effective_hours, Decimal::new(span - brk, 0) / Decimal::new(4, 0));
        prop_assert!(day.effective_hours >= Decimal::ZERO);
        prop_assert!(results.warnings.is_empty());
    }

    #[test]
    fn capped_hours_never_exceed_cap(entries in prop::collection::vec(entry_strategy(), 1..20)) {
        let results = compute_daily_results(
            &entries,
            DEFAULT_TARGET_HOURS_PER_DAY,
            DEFAULT_DAILY_CAP_HOURS,
        );

        for day in results.iter() {
            prop_assert!(day.capped_hours <= DEFAULT_DAILY_CAP_HOURS);
            prop_assert!(day.capped_hours <= day.effective_hours);
            prop_assert_eq!(day.overtime_hours, day.capped_hours - DEFAULT_TARGET_HOURS_PER_DAY);
        }
    }

    #[test]
    fn monthly_totals_add_over_disjoint_days(
        entries in prop::collection::vec(entry_strategy(), 0..30),
        split_day in 1u32..=30,
    ) {
        let (early, late): (Vec<_>, Vec<_>) = entries
            .iter()
            .cloned()
            .partition(|e| e.day < september(split_day));

        let all = compute_daily_results(&entries, DEFAULT_TARGET_HOURS_PER_DAY, DEFAULT_DAILY_CAP_HOURS);
        let first = compute_daily_results(&early, DEFAULT_TARGET_HOURS_PER_DAY, DEFAULT_DAILY_CAP_HOURS);
        let second = compute_daily_results(&late, DEFAULT_TARGET_HOURS_PER_DAY, DEFAULT_DAILY_CAP_HOURS);

        prop_assert_eq!(
            aggregate_month(all.iter()),
            aggregate_month(first.iter()) + aggregate_month(second.iter())
        );
    }

    #[test]
    fn manual_correction_never_negative(previous in -10_000i64..10_000, delta in -10_000i64..10_000) {
        let previous = Decimal::new(previous, 1);
        let delta = Decimal::new(delta, 1);
        let corrected = apply_manual_correction(previous, delta);

        prop_assert!(corrected >= Decimal::ZERO);
        if previous + delta >= Decimal::ZERO {
            prop_assert_eq!(corrected, previous + delta);
        }
    }

    #[test]
    fn target_hours_bounded_by_weekdays(
        year in 2000i32..2100,
        month in 1u32..=12,
        holiday_days in prop::collection::btree_set(1u32..=28, 0..6),
    ) {
        let holidays: BTreeSet<NaiveDate> = holiday_days
            .iter()
            .map(|d| NaiveDate::from_ymd_opt(year, month, *d).unwrap())
            .collect();

        let plain = compute_target_hours(year, month, &BTreeSet::new(), DEFAULT_TARGET_HOURS_PER_DAY, 1).unwrap();
        let with_holidays = compute_target_hours(year, month, &holidays, DEFAULT_TARGET_HOURS_PER_DAY, 1).unwrap();

        prop_assert!((20..=23).contains(&plain.weekday_count));
        prop_assert!(with_holidays.hours <= plain.hours);
        prop_assert_eq!(
            with_holidays.hours,
            plain.hours - DEFAULT_TARGET_HOURS_PER_DAY * Decimal::from(with_holidays.holiday_weekdays.len() as u32)
        );
    }

    #[test]
    fn absence_corrected_target_stays_in_range(
        target in 0i64..=200,
        periods in prop::collection::vec((1u32..=30, 0i64..=40), 0..5),
    ) {
        let target = Decimal::new(target, 0);
        let absences: Vec<AbsencePeriod> = periods
            .iter()
            .map(|(start, len)| AbsencePeriod {
                start: september(*start),
                end: september(*start) + Duration::days(*len),
                kind: AbsenceKind::Vacation,
            })
            .collect();

        for matching in [AbsenceMatching::Overlap, AbsenceMatching::Endpoint] {
            let result = apply_absence_correction(
                target,
                &absences,
                2023,
                9,
                DEFAULT_TARGET_HOURS_PER_DAY,
                matching,
                2,
            )
            .unwrap();

            prop_assert!(result.corrected_hours >= Decimal::ZERO);
            prop_assert!(result.corrected_hours <= target);
        }
    }

    #[test]
    fn clock_breaks_parse_to_their_duration(hours in 0i64..5, minutes in 0i64..60, seconds in 0i64..60) {
        let text = format!("{:02}:{:02}:{:02}", hours, minutes, seconds);
        prop_assert_eq!(
            parse_break_duration(&text).unwrap(),
            Duration::seconds(hours * 3600 + minutes * 60 + seconds)
        );
    }
}
