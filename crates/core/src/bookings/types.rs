//! Booking data types.

use carrental_shared::types::{BookingId, CarId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::BookingError;

/// Who to reach about a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookingContact {
    /// Customer name.
    pub name: String,
    /// Customer email.
    #[validate(email)]
    pub email: String,
    /// Customer phone number.
    pub phone: Option<String>,
}

/// A rental booking of one car over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking ID.
    pub id: BookingId,
    /// Booked car.
    pub car_id: CarId,
    /// Car name at booking time.
    pub car_name: String,
    /// Car type at booking time.
    pub car_type: String,
    /// First day of the rental.
    pub start_date: NaiveDate,
    /// Pick-up time.
    pub start_time: NaiveTime,
    /// Last day of the rental.
    pub end_date: NaiveDate,
    /// Drop-off time.
    pub end_time: NaiveTime,
    /// Where the car is going.
    pub destination: String,
    /// Customer contact.
    pub contact: BookingContact,
}

impl Booking {
    /// Whether `date` falls within `[start_date, end_date]`.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Pick-up moment.
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }
}

/// Input for a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// Booked car.
    pub car_id: CarId,
    /// Car name.
    pub car_name: String,
    /// Car type.
    pub car_type: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Pick-up time.
    pub start_time: NaiveTime,
    /// Last day.
    pub end_date: NaiveDate,
    /// Drop-off time.
    pub end_time: NaiveTime,
    /// Destination.
    pub destination: String,
    /// Customer contact.
    pub contact: BookingContact,
}

impl NewBooking {
    /// Checks required fields and the date range.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), BookingError> {
        for (field, value) in [
            ("car_name", &self.car_name),
            ("destination", &self.destination),
            ("contact.name", &self.contact.name),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::MissingField(field));
            }
        }

        if self.contact.validate().is_err() {
            return Err(BookingError::InvalidEmail(self.contact.email.clone()));
        }

        if self.end_date.and_time(self.end_time) < self.start_date.and_time(self.start_time) {
            return Err(BookingError::EndsBeforeStart);
        }

        Ok(())
    }

    /// Builds the stored booking.
    #[must_use]
    pub fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            car_id: self.car_id,
            car_name: self.car_name.trim().to_string(),
            car_type: self.car_type.trim().to_string(),
            start_date: self.start_date,
            start_time: self.start_time,
            end_date: self.end_date,
            end_time: self.end_time,
            destination: self.destination.trim().to_string(),
            contact: BookingContact {
                name: self.contact.name.trim().to_string(),
                email: self.contact.email.trim().to_string(),
                phone: self
                    .contact
                    .phone
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
            },
        }
    }
}
