//! Rental booking repository.

use carrental_core::bookings::{Booking, BookingContact};
use carrental_shared::types::{BookingId, CarId};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::rental_bookings;

impl From<rental_bookings::Model> for Booking {
    fn from(model: rental_bookings::Model) -> Self {
        Self {
            id: BookingId::from_uuid(model.id),
            car_id: CarId::from_uuid(model.car_id),
            car_name: model.car_name,
            car_type: model.car_type,
            start_date: model.start_date,
            start_time: model.start_time,
            end_date: model.end_date,
            end_time: model.end_time,
            destination: model.destination,
            contact: BookingContact {
                name: model.contact_name,
                email: model.contact_email,
                phone: model.contact_phone,
            },
        }
    }
}

/// Repository for the `rental_bookings` collection.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, booking: &Booking) -> Result<Booking, DbErr> {
        rental_bookings::ActiveModel {
            id: Set(booking.id.into_inner()),
            car_id: Set(booking.car_id.into_inner()),
            car_name: Set(booking.car_name.clone()),
            car_type: Set(booking.car_type.clone()),
            start_date: Set(booking.start_date),
            start_time: Set(booking.start_time),
            end_date: Set(booking.end_date),
            end_time: Set(booking.end_time),
            destination: Set(booking.destination.clone()),
            contact_name: Set(booking.contact.name.clone()),
            contact_email: Set(booking.contact.email.clone()),
            contact_phone: Set(booking.contact.phone.clone()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map(Booking::from)
    }

    /// All bookings, optionally only those for one car, by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, car_id: Option<CarId>) -> Result<Vec<Booking>, DbErr> {
        let mut query = rental_bookings::Entity::find();
        if let Some(car_id) = car_id {
            query = query.filter(rental_bookings::Column::CarId.eq(car_id.into_inner()));
        }

        Ok(query
            .order_by_asc(rental_bookings::Column::StartDate)
            .order_by_asc(rental_bookings::Column::StartTime)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Booking::from)
            .collect())
    }

    /// Bookings whose date range overlaps `[from, to]`, optionally for one car.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_overlapping(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        car_id: Option<CarId>,
    ) -> Result<Vec<Booking>, DbErr> {
        let mut query = rental_bookings::Entity::find()
            .filter(rental_bookings::Column::StartDate.lte(to))
            .filter(rental_bookings::Column::EndDate.gte(from));
        if let Some(car_id) = car_id {
            query = query.filter(rental_bookings::Column::CarId.eq(car_id.into_inner()));
        }

        Ok(query
            .order_by_asc(rental_bookings::Column::StartDate)
            .order_by_asc(rental_bookings::Column::StartTime)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Booking::from)
            .collect())
    }

    /// Bookings that end on or after `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_not_ended(&self, today: NaiveDate) -> Result<Vec<Booking>, DbErr> {
        Ok(rental_bookings::Entity::find()
            .filter(rental_bookings::Column::EndDate.gte(today))
            .order_by_asc(rental_bookings::Column::StartDate)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Booking::from)
            .collect())
    }
}
