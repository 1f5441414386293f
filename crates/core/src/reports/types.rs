//! Report data types.

use std::collections::BTreeMap;
use std::fmt;

use carrental_shared::config::{EmptyMonthSalary, ReportsConfig};
use carrental_shared::types::{CarId, ReportId, UserId};
use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Largest day count a report can carry; the store column is a 32-bit integer.
pub const MAX_RENTAL_DAYS: u32 = i32::MAX.unsigned_abs();

/// A single revenue/expense transaction for one car on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Report ID.
    pub id: ReportId,
    /// Car the transaction belongs to.
    pub car_id: CarId,
    /// Driver who logged it.
    pub user_id: UserId,
    /// Calendar date of the transaction.
    pub transaction_date: NaiveDate,
    /// Rental destination.
    pub destination: String,
    /// Daily rental rate.
    pub rental_rate_amount: Decimal,
    /// Number of rental days.
    pub number_of_rental_days: u32,
    /// Amount actually paid.
    pub paid_amount: Decimal,
    /// Driver's share.
    pub driver_income: Decimal,
    /// Car expense (fuel, repairs...).
    pub car_expense: Decimal,
    /// What the expense was for.
    pub expense_description: Option<String>,
    /// Free-form comments.
    pub comments: Option<String>,
}

impl DailyReport {
    /// Rental rate times number of days.
    ///
    /// Saturates at the `Decimal` bounds for stored records that were never
    /// validated.
    #[must_use]
    pub fn amount_due(&self) -> Decimal {
        self.rental_rate_amount
            .saturating_mul(Decimal::from(self.number_of_rental_days))
    }

    /// Outstanding amount, never negative.
    #[must_use]
    pub fn balance_amount(&self) -> Decimal {
        self.amount_due()
            .saturating_sub(self.paid_amount)
            .max(Decimal::ZERO)
    }

    /// Calendar month the transaction falls in.
    #[must_use]
    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(self.transaction_date)
    }
}

/// Input for logging a new daily report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDailyReport {
    /// Calendar date of the transaction.
    pub transaction_date: NaiveDate,
    /// Rental destination.
    pub destination: String,
    /// Daily rental rate.
    pub rental_rate_amount: Decimal,
    /// Number of rental days.
    pub number_of_rental_days: u32,
    /// Amount actually paid.
    pub paid_amount: Decimal,
    /// Driver's share.
    pub driver_income: Decimal,
    /// Car expense.
    pub car_expense: Decimal,
    /// What the expense was for.
    pub expense_description: Option<String>,
    /// Free-form comments.
    pub comments: Option<String>,
}

impl NewDailyReport {
    /// Rental rate times number of days, or `None` if it does not fit a `Decimal`.
    #[must_use]
    pub fn checked_amount_due(&self) -> Option<Decimal> {
        self.rental_rate_amount
            .checked_mul(Decimal::from(self.number_of_rental_days))
    }

    /// Builds the stored report once validation has passed.
    #[must_use]
    pub fn into_report(self, id: ReportId, car_id: CarId, user_id: UserId) -> DailyReport {
        DailyReport {
            id,
            car_id,
            user_id,
            transaction_date: self.transaction_date,
            destination: self.destination.trim().to_string(),
            rental_rate_amount: self.rental_rate_amount,
            number_of_rental_days: self.number_of_rental_days,
            paid_amount: self.paid_amount,
            driver_income: self.driver_income,
            car_expense: self.car_expense,
            expense_description: non_blank(self.expense_description),
            comments: non_blank(self.comments),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A daily report as it sits in the `DailyReports` collection.
///
/// Documents written by older clients may lack numeric fields or carry dates
/// in other shapes, so nothing here is trusted until `into_report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDailyReport {
    /// Report ID.
    pub id: ReportId,
    /// Car ID.
    pub car_id: CarId,
    /// Driver ID.
    pub user_id: UserId,
    /// Transaction date as stored.
    pub transaction_date: String,
    /// Destination.
    pub destination: Option<String>,
    /// Daily rate.
    pub rental_rate_amount: Option<Decimal>,
    /// Number of days.
    pub number_of_rental_days: Option<i32>,
    /// Paid amount.
    pub paid_amount: Option<Decimal>,
    /// Driver income.
    pub driver_income: Option<Decimal>,
    /// Car expense.
    pub car_expense: Option<Decimal>,
    /// Expense description.
    pub expense_description: Option<String>,
    /// Comments.
    pub comments: Option<String>,
}

impl RawDailyReport {
    /// Converts the stored document into a typed report.
    ///
    /// Missing numeric fields become zero; a negative day count is treated as zero.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTransactionDate` if the date cannot be parsed.
    pub fn into_report(self) -> Result<DailyReport, ReportError> {
        let transaction_date = parse_transaction_date(&self.transaction_date)
            .ok_or_else(|| ReportError::InvalidTransactionDate(self.transaction_date.clone()))?;

        Ok(DailyReport {
            id: self.id,
            car_id: self.car_id,
            user_id: self.user_id,
            transaction_date,
            destination: self.destination.unwrap_or_default(),
            rental_rate_amount: self.rental_rate_amount.unwrap_or_default(),
            number_of_rental_days: self
                .number_of_rental_days
                .and_then(|d| u32::try_from(d).ok())
                .unwrap_or(0),
            paid_amount: self.paid_amount.unwrap_or_default(),
            driver_income: self.driver_income.unwrap_or_default(),
            car_expense: self.car_expense.unwrap_or_default(),
            expense_description: self.expense_description,
            comments: self.comments,
        })
    }
}

impl From<&DailyReport> for RawDailyReport {
    fn from(report: &DailyReport) -> Self {
        Self {
            id: report.id,
            car_id: report.car_id,
            user_id: report.user_id,
            transaction_date: report.transaction_date.format("%Y-%m-%d").to_string(),
            destination: Some(report.destination.clone()),
            rental_rate_amount: Some(report.rental_rate_amount),
            number_of_rental_days: i32::try_from(report.number_of_rental_days).ok(),
            paid_amount: Some(report.paid_amount),
            driver_income: Some(report.driver_income),
            car_expense: Some(report.car_expense),
            expense_description: report.expense_description.clone(),
            comments: report.comments.clone(),
        }
    }
}

/// Parses a stored transaction date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is kept).
#[must_use]
pub fn parse_transaction_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Calendar month used to group reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl MonthKey {
    /// Builds a key, rejecting months outside 1..=12.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(ReportError::InvalidMonth(month))
        }
    }

    /// Month containing the given date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Constants and policy the summaries are computed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Fixed monthly driver salary.
    pub driver_salary: Decimal,
    /// Management fee as a share of amount due.
    pub management_fee_rate: Decimal,
    /// Yearly rental target.
    pub annual_target: Decimal,
    /// What months without reports contribute to the year table.
    pub empty_month_salary: EmptyMonthSalary,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from(&ReportsConfig::default())
    }
}

impl From<&ReportsConfig> for ReportSettings {
    fn from(config: &ReportsConfig) -> Self {
        Self {
            driver_salary: config.driver_salary,
            management_fee_rate: config.management_fee_rate,
            annual_target: config.annual_target,
            empty_month_salary: config.empty_month_salary,
        }
    }
}

/// Financial summary of one car for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Number of reports aggregated.
    pub report_count: u32,
    /// Sum of amount due.
    pub total_amount_due: Decimal,
    /// Sum of driver income.
    pub total_driver_income: Decimal,
    /// Sum of car expenses.
    pub total_car_expenses: Decimal,
    /// Sum of paid amounts.
    pub total_paid_amount: Decimal,
    /// Fixed driver salary charged for the month.
    pub driver_salary: Decimal,
    /// Management fee (rate x total amount due).
    pub management_fee: Decimal,
    /// Driver income + car expenses + management fee + driver salary.
    pub total_expenses: Decimal,
    /// Total amount due minus total expenses.
    pub net_income: Decimal,
}

impl MonthlySummary {
    /// Zeroed accumulators carrying the given salary.
    #[must_use]
    pub fn empty(key: MonthKey, driver_salary: Decimal) -> Self {
        Self {
            year: key.year,
            month: key.month,
            report_count: 0,
            total_amount_due: Decimal::ZERO,
            total_driver_income: Decimal::ZERO,
            total_car_expenses: Decimal::ZERO,
            total_paid_amount: Decimal::ZERO,
            driver_salary,
            management_fee: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_income: Decimal::ZERO,
        }
    }

    /// Key of the month this summary covers.
    #[must_use]
    pub const fn key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }

    /// Adds one report to the accumulators.
    ///
    /// Totals saturate at the `Decimal` bounds instead of overflowing.
    pub fn accumulate(&mut self, report: &DailyReport) {
        self.report_count = self.report_count.saturating_add(1);
        self.total_amount_due = self.total_amount_due.saturating_add(report.amount_due());
        self.total_driver_income = self.total_driver_income.saturating_add(report.driver_income);
        self.total_car_expenses = self.total_car_expenses.saturating_add(report.car_expense);
        self.total_paid_amount = self.total_paid_amount.saturating_add(report.paid_amount);
    }

    /// Computes the derived fields from the accumulators.
    pub fn finalize(&mut self, management_fee_rate: Decimal) {
        self.management_fee = self.total_amount_due.saturating_mul(management_fee_rate);
        self.total_expenses = self
            .total_driver_income
            .saturating_add(self.total_car_expenses)
            .saturating_add(self.management_fee)
            .saturating_add(self.driver_salary);
        self.net_income = self.total_amount_due.saturating_sub(self.total_expenses);
    }
}

/// Result of aggregating a batch of stored reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyAggregation {
    /// Summaries for every month that had at least one report.
    pub months: BTreeMap<MonthKey, MonthlySummary>,
    /// Records left out because their transaction date was unparseable.
    pub skipped_records: usize,
}

/// Yearly totals against the annual target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyRollup {
    /// Calendar year.
    pub year: i32,
    /// Sum of total amount due across the year's months.
    pub total_yearly_rentals: Decimal,
    /// Target the percentage is computed against.
    pub annual_target: Decimal,
    /// Total / target x 100, two decimal places.
    pub percentage_of_goal: Decimal,
    /// Months of the year that had reports.
    pub months_reported: u32,
}

/// Twelve monthly rows plus the yearly rollup for one car and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTable {
    /// Calendar year.
    pub year: i32,
    /// One row per month, January first.
    pub rows: Vec<MonthlySummary>,
    /// Yearly totals.
    pub rollup: YearlyRollup,
    /// Records skipped because of unparseable dates.
    pub skipped_records: usize,
}
