//! Tests for monthly aggregation and yearly rollup.

use carrental_shared::config::EmptyMonthSalary;
use carrental_shared::types::{CarId, ReportId, UserId};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::ReportService;
use super::types::{DailyReport, MAX_RENTAL_DAYS, MonthKey, NewDailyReport, RawDailyReport, ReportSettings};
use super::validation::validate_new_report;

fn report(date: (i32, u32, u32), due: Decimal, driver: Decimal, car: Decimal, paid: Decimal) -> DailyReport {
    DailyReport {
        id: ReportId::new(),
        car_id: CarId::from_uuid(uuid::Uuid::nil()),
        user_id: UserId::from_uuid(uuid::Uuid::nil()),
        transaction_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        destination: "Nairobi".to_string(),
        rental_rate_amount: due,
        number_of_rental_days: 1,
        paid_amount: paid,
        driver_income: driver,
        car_expense: car,
        expense_description: None,
        comments: None,
    }
}

#[test]
fn test_single_report_month_summary() {
    let reports = vec![report((2024, 3, 14), dec!(100000), dec!(20000), dec!(5000), dec!(100000))];

    let months = ReportService::aggregate_monthly(&reports, &ReportSettings::default());
    let march = &months[&MonthKey { year: 2024, month: 3 }];

    assert_eq!(march.total_amount_due, dec!(100000));
    assert_eq!(march.management_fee, dec!(10000));
    assert_eq!(march.total_expenses, dec!(85000));
    assert_eq!(march.net_income, dec!(15000));
    assert_eq!(march.report_count, 1);
}

#[test]
fn test_reports_grouped_by_calendar_month() {
    let reports = vec![
        report((2024, 1, 31), dec!(1000), dec!(0), dec!(0), dec!(0)),
        report((2024, 2, 1), dec!(2000), dec!(0), dec!(0), dec!(0)),
        report((2024, 2, 29), dec!(3000), dec!(100), dec!(50), dec!(3000)),
        report((2023, 2, 10), dec!(4000), dec!(0), dec!(0), dec!(0)),
    ];

    let months = ReportService::aggregate_monthly(&reports, &ReportSettings::default());

    assert_eq!(months.len(), 3);
    let feb = &months[&MonthKey { year: 2024, month: 2 }];
    assert_eq!(feb.total_amount_due, dec!(5000));
    assert_eq!(feb.total_paid_amount, dec!(3000));
    assert_eq!(feb.total_driver_income, dec!(100));
    assert_eq!(feb.total_car_expenses, dec!(50));
    assert_eq!(feb.report_count, 2);
    assert_eq!(months[&MonthKey { year: 2023, month: 2 }].total_amount_due, dec!(4000));
}

#[test]
fn test_month_key_display() {
    assert_eq!(MonthKey { year: 2024, month: 3 }.to_string(), "2024-3");
    assert!(MonthKey::new(2024, 13).is_err());
    assert!(MonthKey::new(2024, 0).is_err());
}

#[test]
fn test_amount_due_and_balance() {
    let mut r = report((2024, 6, 1), dec!(2500), dec!(0), dec!(0), dec!(5000));
    r.number_of_rental_days = 2;
    assert_eq!(r.amount_due(), dec!(5000));
    assert_eq!(r.balance_amount(), Decimal::ZERO);

    r.paid_amount = dec!(1000);
    assert_eq!(r.balance_amount(), dec!(4000));

    r.paid_amount = dec!(9000);
    assert_eq!(r.balance_amount(), Decimal::ZERO);
}

#[test]
fn test_raw_missing_numbers_default_to_zero() {
    let raw = RawDailyReport {
        transaction_date: "2024-05-02".to_string(),
        rental_rate_amount: Some(dec!(3000)),
        ..RawDailyReport::default()
    };

    let converted = raw.into_report().unwrap();
    assert_eq!(converted.number_of_rental_days, 0);
    assert_eq!(converted.amount_due(), Decimal::ZERO);
    assert_eq!(converted.paid_amount, Decimal::ZERO);
    assert_eq!(converted.destination, "");
}

#[test]
fn test_raw_accepts_rfc3339_dates() {
    let raw = RawDailyReport {
        transaction_date: "2024-05-02T08:30:00+03:00".to_string(),
        ..RawDailyReport::default()
    };
    assert_eq!(
        raw.into_report().unwrap().transaction_date,
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    );
}

#[test]
fn test_unparseable_dates_are_skipped_not_bucketed() {
    let good = RawDailyReport::from(&report((2024, 4, 1), dec!(1000), dec!(0), dec!(0), dec!(0)));
    let bad = RawDailyReport {
        transaction_date: "Invalid Date".to_string(),
        rental_rate_amount: Some(dec!(99999)),
        number_of_rental_days: Some(1),
        ..RawDailyReport::default()
    };
    let empty = RawDailyReport::default();

    let aggregation = ReportService::aggregate_records(vec![good, bad, empty], &ReportSettings::default());

    assert_eq!(aggregation.skipped_records, 2);
    assert_eq!(aggregation.months.len(), 1);
    assert_eq!(
        aggregation.months[&MonthKey { year: 2024, month: 4 }].total_amount_due,
        dec!(1000)
    );
}

#[test]
fn test_longest_rental_survives_store_round_trip() {
    let mut r = report((2024, 7, 1), dec!(1), dec!(0), dec!(0), dec!(0));
    r.number_of_rental_days = MAX_RENTAL_DAYS;

    let stored = RawDailyReport::from(&r);
    assert_eq!(stored.number_of_rental_days, Some(i32::MAX));

    let read_back = stored.into_report().unwrap();
    assert_eq!(read_back.number_of_rental_days, MAX_RENTAL_DAYS);
    assert_eq!(read_back.amount_due(), r.amount_due());
}

#[test]
fn test_oversized_stored_records_saturate() {
    let mut huge = report((2024, 8, 1), Decimal::MAX, Decimal::MAX, Decimal::MAX, dec!(-1));
    huge.number_of_rental_days = 2;
    let reports = vec![huge.clone(), huge];

    assert_eq!(reports[0].amount_due(), Decimal::MAX);
    assert_eq!(reports[0].balance_amount(), Decimal::MAX);

    let months = ReportService::aggregate_monthly(&reports, &ReportSettings::default());
    let august = &months[&MonthKey { year: 2024, month: 8 }];
    assert_eq!(august.total_amount_due, Decimal::MAX);
    assert_eq!(august.total_expenses, Decimal::MAX);
    assert_eq!(august.net_income, Decimal::ZERO);

    let tiny_target = ReportSettings {
        annual_target: dec!(0.0000001),
        ..ReportSettings::default()
    };
    let rollup = ReportService::yearly_rollup(&months, 2024, &tiny_target);
    assert_eq!(rollup.total_yearly_rentals, Decimal::MAX);
    assert_eq!(rollup.percentage_of_goal, Decimal::MAX);
}

#[test]
fn test_year_table_empty_month_skip_policy() {
    let reports = vec![report((2024, 3, 1), dec!(100000), dec!(20000), dec!(5000), dec!(100000))];
    let aggregation = ReportService::aggregate_records(
        reports.iter().map(RawDailyReport::from).collect(),
        &ReportSettings::default(),
    );

    let table = ReportService::year_table(&aggregation, 2024, &ReportSettings::default());

    assert_eq!(table.rows.len(), 12);
    assert_eq!(table.rows[2].net_income, dec!(15000));
    let april = &table.rows[3];
    assert_eq!(april.month, 4);
    assert_eq!(april.driver_salary, Decimal::ZERO);
    assert_eq!(april.total_expenses, Decimal::ZERO);
    assert_eq!(april.net_income, Decimal::ZERO);
}

#[test]
fn test_year_table_empty_month_accrue_policy() {
    let settings = ReportSettings {
        empty_month_salary: EmptyMonthSalary::Accrue,
        ..ReportSettings::default()
    };

    let table = ReportService::year_table(&Default::default(), 2024, &settings);

    for row in &table.rows {
        assert_eq!(row.total_amount_due, Decimal::ZERO);
        assert_eq!(row.total_expenses, dec!(50000));
        assert_eq!(row.net_income, dec!(-50000));
    }
    assert_eq!(table.rollup.total_yearly_rentals, Decimal::ZERO);
    assert_eq!(table.rollup.months_reported, 0);
}

#[test]
fn test_yearly_rollup_twelve_months() {
    let reports: Vec<DailyReport> = (1..=12)
        .map(|m| report((2024, m, 15), dec!(100000), dec!(0), dec!(0), dec!(0)))
        .collect();
    let settings = ReportSettings::default();
    let months = ReportService::aggregate_monthly(&reports, &settings);

    let rollup = ReportService::yearly_rollup(&months, 2024, &settings);

    assert_eq!(rollup.total_yearly_rentals, dec!(1200000));
    assert_eq!(rollup.percentage_of_goal, dec!(120.00));
    assert_eq!(rollup.months_reported, 12);
}

#[test]
fn test_yearly_rollup_ignores_other_years() {
    let reports = vec![
        report((2023, 12, 31), dec!(500000), dec!(0), dec!(0), dec!(0)),
        report((2024, 1, 1), dec!(333333), dec!(0), dec!(0), dec!(0)),
    ];
    let settings = ReportSettings::default();
    let months = ReportService::aggregate_monthly(&reports, &settings);

    let rollup = ReportService::yearly_rollup(&months, 2024, &settings);

    assert_eq!(rollup.total_yearly_rentals, dec!(333333));
    assert_eq!(rollup.percentage_of_goal, dec!(33.33));
}

fn arb_report() -> impl Strategy<Value = DailyReport> {
    (
        2020i32..2030,
        1u32..=12,
        1u32..=28,
        0i64..1_000_000,
        1u32..30,
        0i64..500_000,
        0i64..500_000,
    )
        .prop_map(|(y, m, d, rate, days, driver, car)| {
            let mut r = report(
                (y, m, d),
                Decimal::from(rate),
                Decimal::from(driver),
                Decimal::from(car),
                Decimal::from(rate),
            );
            r.number_of_rental_days = days;
            r
        })
}

fn arb_entry() -> impl Strategy<Value = NewDailyReport> {
    (
        prop_oneof![
            (1i64..1_000_000).prop_map(Decimal::from),
            Just(Decimal::MAX),
            (1u32..=u32::MAX).prop_map(|scale| Decimal::MAX / Decimal::from(scale)),
        ],
        prop_oneof![1u32..30, Just(MAX_RENTAL_DAYS), (MAX_RENTAL_DAYS - 1)..=u32::MAX],
    )
        .prop_map(|(rate, days)| NewDailyReport {
            transaction_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            destination: "Kisumu".to_string(),
            rental_rate_amount: rate,
            number_of_rental_days: days,
            paid_amount: Decimal::ZERO,
            driver_income: Decimal::ZERO,
            car_expense: Decimal::ZERO,
            expense_description: None,
            comments: None,
        })
}

proptest! {
    /// Accepted entries keep their day count and amount due through the store
    /// shape; rejected ones are refused rather than panicking.
    #[test]
    fn prop_accepted_entries_round_trip(entry in arb_entry()) {
        if validate_new_report(&entry).is_ok() {
            let due = entry.checked_amount_due();
            prop_assert!(due.is_some());

            let report = entry.into_report(ReportId::new(), CarId::new(), UserId::new());
            let read_back = RawDailyReport::from(&report).into_report().unwrap();
            prop_assert_eq!(read_back.number_of_rental_days, report.number_of_rental_days);
            prop_assert_eq!(Some(read_back.amount_due()), due);
        }
    }

    /// Net income equals amount due minus driver income, car expenses, the
    /// 10% management fee and the fixed salary, for every month.
    #[test]
    fn prop_net_income_formula(reports in prop::collection::vec(arb_report(), 0..40)) {
        let months = ReportService::aggregate_monthly(&reports, &ReportSettings::default());

        for summary in months.values() {
            let expected = summary.total_amount_due
                - (summary.total_driver_income
                    + summary.total_car_expenses
                    + summary.total_amount_due * dec!(0.10)
                    + dec!(50000));
            prop_assert_eq!(summary.net_income, expected);
        }
    }

    /// Aggregating the same input twice yields identical output.
    #[test]
    fn prop_aggregation_is_idempotent(reports in prop::collection::vec(arb_report(), 0..40)) {
        let settings = ReportSettings::default();
        let first = ReportService::aggregate_monthly(&reports, &settings);
        let second = ReportService::aggregate_monthly(&reports, &settings);
        prop_assert_eq!(first, second);
    }

    /// Every report lands in exactly one month, so totals are preserved.
    #[test]
    fn prop_totals_preserved(reports in prop::collection::vec(arb_report(), 0..40)) {
        let months = ReportService::aggregate_monthly(&reports, &ReportSettings::default());

        let due: Decimal = reports.iter().map(DailyReport::amount_due).sum();
        let grouped: Decimal = months.values().map(|m| m.total_amount_due).sum();
        let count: u32 = months.values().map(|m| m.report_count).sum();

        prop_assert_eq!(due, grouped);
        prop_assert_eq!(count as usize, reports.len());
    }
}
