//! Monthly aggregation and yearly rollup.

use std::collections::BTreeMap;

use carrental_shared::config::EmptyMonthSalary;
use rust_decimal::Decimal;

use super::types::{
    DailyReport, MonthKey, MonthlyAggregation, MonthlySummary, RawDailyReport, ReportSettings,
    YearTable, YearlyRollup,
};

/// Service for computing financial summaries from daily reports.
///
/// Everything here is a pure function of its input; summaries are recomputed
/// on every fetch and never stored.
pub struct ReportService;

impl ReportService {
    /// Groups reports of a single car by calendar month and summarizes each month.
    #[must_use]
    pub fn aggregate_monthly<'a, I>(reports: I, settings: &ReportSettings) -> BTreeMap<MonthKey, MonthlySummary>
    where
        I: IntoIterator<Item = &'a DailyReport>,
    {
        let mut months: BTreeMap<MonthKey, MonthlySummary> = BTreeMap::new();

        for report in reports {
            let key = report.month_key();
            months
                .entry(key)
                .or_insert_with(|| MonthlySummary::empty(key, settings.driver_salary))
                .accumulate(report);
        }

        for summary in months.values_mut() {
            summary.finalize(settings.management_fee_rate);
        }

        months
    }

    /// Converts stored records and aggregates the ones with a usable date.
    ///
    /// Records whose transaction date cannot be parsed are counted, not grouped.
    #[must_use]
    pub fn aggregate_records(records: Vec<RawDailyReport>, settings: &ReportSettings) -> MonthlyAggregation {
        let total = records.len();
        let reports: Vec<DailyReport> = records
            .into_iter()
            .filter_map(|raw| raw.into_report().ok())
            .collect();

        MonthlyAggregation {
            skipped_records: total - reports.len(),
            months: Self::aggregate_monthly(&reports, settings),
        }
    }

    /// Sums the amount due of every month in `year` and compares it to the target.
    #[must_use]
    pub fn yearly_rollup(
        months: &BTreeMap<MonthKey, MonthlySummary>,
        year: i32,
        settings: &ReportSettings,
    ) -> YearlyRollup {
        let in_year = months.values().filter(|m| m.year == year);

        let (total_yearly_rentals, months_reported) = in_year.fold(
            (Decimal::ZERO, 0u32),
            |(total, count), m| (total.saturating_add(m.total_amount_due), count + 1),
        );

        YearlyRollup {
            year,
            total_yearly_rentals,
            annual_target: settings.annual_target,
            percentage_of_goal: Self::percentage_of_goal(total_yearly_rentals, settings.annual_target),
            months_reported,
        }
    }

    /// Builds the twelve-row table for `year`.
    ///
    /// Months without reports render as zero rows; under
    /// `EmptyMonthSalary::Accrue` they still carry the driver salary.
    #[must_use]
    pub fn year_table(aggregation: &MonthlyAggregation, year: i32, settings: &ReportSettings) -> YearTable {
        let rows = (1..=12)
            .map(|month| {
                let key = MonthKey { year, month };
                aggregation
                    .months
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| Self::empty_month(key, settings))
            })
            .collect();

        YearTable {
            year,
            rows,
            rollup: Self::yearly_rollup(&aggregation.months, year, settings),
            skipped_records: aggregation.skipped_records,
        }
    }

    fn empty_month(key: MonthKey, settings: &ReportSettings) -> MonthlySummary {
        match settings.empty_month_salary {
            EmptyMonthSalary::Skip => MonthlySummary::empty(key, Decimal::ZERO),
            EmptyMonthSalary::Accrue => {
                let mut summary = MonthlySummary::empty(key, settings.driver_salary);
                summary.finalize(settings.management_fee_rate);
                summary
            }
        }
    }

    fn percentage_of_goal(total: Decimal, target: Decimal) -> Decimal {
        if target.is_zero() {
            return Decimal::ZERO;
        }
        total
            .checked_div(target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::MAX, |pct| pct.round_dp(2))
    }
}
