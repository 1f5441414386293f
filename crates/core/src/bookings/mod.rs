//! Rental bookings and calendar occupancy.
//!
//! Bookings are read-only for display purposes here: the conflict filter
//! reports which bookings cover a date, it never rejects overlaps.

pub mod calendar;
pub mod error;
pub mod types;

pub use calendar::{DayOccupancy, MonthBookings, OccupancyStatus, bookings_on, group_upcoming_by_month, month_occupancy};
pub use error::BookingError;
pub use types::{Booking, BookingContact, NewBooking};
