//! Business rule validation for daily report entry.

use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{MAX_RENTAL_DAYS, NewDailyReport};

/// Validates a daily report before it is stored.
///
/// # Errors
///
/// Returns the first rule the report breaks.
pub fn validate_new_report(report: &NewDailyReport) -> Result<(), ReportError> {
    if report.destination.trim().is_empty() {
        return Err(ReportError::MissingField("destination"));
    }
    if report.rental_rate_amount <= Decimal::ZERO {
        return Err(ReportError::NonPositive {
            field: "rental_rate_amount",
        });
    }
    if report.number_of_rental_days == 0 {
        return Err(ReportError::NonPositive {
            field: "number_of_rental_days",
        });
    }
    if report.number_of_rental_days > MAX_RENTAL_DAYS {
        return Err(ReportError::TooManyDays {
            max: MAX_RENTAL_DAYS,
        });
    }

    for (field, value) in [
        ("paid_amount", report.paid_amount),
        ("driver_income", report.driver_income),
        ("car_expense", report.car_expense),
    ] {
        if value < Decimal::ZERO {
            return Err(ReportError::Negative { field });
        }
    }

    let due = report
        .checked_amount_due()
        .ok_or(ReportError::AmountTooLarge)?;
    if report.paid_amount > due {
        return Err(ReportError::Overpayment {
            paid: report.paid_amount,
            due,
        });
    }

    Ok(())
}
