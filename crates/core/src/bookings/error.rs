//! Booking error types.

use thiserror::Error;

/// Errors raised while validating bookings or building calendars.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Contact email is not an email address.
    #[error("Invalid contact email: {0}")]
    InvalidEmail(String),

    /// The booking ends before it starts.
    #[error("Booking cannot end before it starts")]
    EndsBeforeStart,

    /// Calendar month outside 1..=12 or year out of range.
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}
