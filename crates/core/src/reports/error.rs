//! Report error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating or converting daily reports.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// A required text field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field that must be strictly positive is zero or negative.
    #[error("{field} must be greater than zero")]
    NonPositive {
        /// Offending field.
        field: &'static str,
    },

    /// A field that must not be negative is negative.
    #[error("{field} cannot be negative")]
    Negative {
        /// Offending field.
        field: &'static str,
    },

    /// More rental days than a report can hold.
    #[error("number_of_rental_days cannot exceed {max}")]
    TooManyDays {
        /// Largest accepted day count.
        max: u32,
    },

    /// Rate times days does not fit the supported amount range.
    #[error("Amount due is too large")]
    AmountTooLarge,

    /// The paid amount is larger than the amount due.
    #[error("Paid amount ({paid}) exceeds amount due ({due})")]
    Overpayment {
        /// Paid amount.
        paid: Decimal,
        /// Amount due (rate x days).
        due: Decimal,
    },

    /// A stored transaction date could not be parsed.
    #[error("Invalid transaction date: {0:?}")]
    InvalidTransactionDate(String),

    /// Month outside 1..=12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
}

impl ReportError {
    /// Whether the error is a business rule rather than malformed input.
    #[must_use]
    pub const fn is_business_rule(&self) -> bool {
        matches!(self, Self::Overpayment { .. })
    }
}
