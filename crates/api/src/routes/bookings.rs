//! Rental bookings: public submission, listings and the occupancy calendar.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use carrental_core::bookings::{
    Booking, BookingError, DayOccupancy, MonthBookings, NewBooking, bookings_on,
    group_upcoming_by_month, month_occupancy,
};
use carrental_db::{BookingRepository, CarRepository};
use carrental_shared::AppError;
use carrental_shared::types::{BookingId, CarId};
use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::AuthUser, routes::cars::load_car_for};

/// Public booking routes.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/bookings", post(create_booking))
}

/// Creates the booking routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/on/{date}", get(bookings_on_date))
        .route("/bookings/upcoming", get(upcoming_bookings))
        .route("/cars/{car_id}/calendar", get(car_calendar))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Human verification token.
    #[serde(default)]
    pub captcha_token: String,
    /// The booking itself.
    #[serde(flatten)]
    pub booking: NewBooking,
}

/// Query parameters for listing bookings.
#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsQuery {
    /// Only bookings of this car.
    pub car_id: Option<CarId>,
}

/// Query parameters for the occupancy calendar.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

/// Bookings covering one date.
#[derive(Debug, Serialize)]
pub struct DateBookingsResponse {
    /// The date asked about.
    pub date: NaiveDate,
    /// Every booking whose range contains it.
    pub bookings: Vec<Booking>,
}

/// Occupancy of one car over one month.
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    /// Car.
    pub car_id: CarId,
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// One entry per day of the month.
    pub days: Vec<DayOccupancy>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /bookings - Submit a booking from the public form.
///
/// The submission is also mirrored to the form relay in the background.
async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    payload.booking.validate()?;
    state.captcha.verify(&payload.captcha_token).await?;

    let car_id = payload.booking.car_id;
    if CarRepository::new((*state.db).clone())
        .find_by_id(car_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("Car {car_id} not found")).into());
    }

    let booking = payload.booking.into_booking(BookingId::new());
    let booking = BookingRepository::new((*state.db).clone())
        .create(&booking)
        .await?;

    info!(
        booking_id = %booking.id,
        car_id = %booking.car_id,
        start = %booking.start_date,
        end = %booking.end_date,
        "Booking created"
    );
    state.form_relay.submit_detached(booking.clone());

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings - All bookings, optionally for one car.
async fn list_bookings(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListBookingsQuery>,
) -> ApiResult<Json<Vec<Booking>>> {
    let bookings = BookingRepository::new((*state.db).clone())
        .list(query.car_id)
        .await?;
    Ok(Json(bookings))
}

/// GET /bookings/on/{date} - Bookings covering a date.
async fn bookings_on_date(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<DateBookingsResponse>> {
    let candidates = BookingRepository::new((*state.db).clone())
        .list_overlapping(date, date, None)
        .await?;

    let bookings = bookings_on(&candidates, date).into_iter().cloned().collect();
    Ok(Json(DateBookingsResponse { date, bookings }))
}

/// GET /bookings/upcoming - Bookings that have not ended, grouped by start month.
async fn upcoming_bookings(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<MonthBookings>>> {
    let today = Utc::now().date_naive();
    let bookings = BookingRepository::new((*state.db).clone())
        .list_not_ended(today)
        .await?;

    Ok(Json(group_upcoming_by_month(&bookings, today)))
}

/// GET /cars/{car_id}/calendar?year=&month= - Day-by-day occupancy of a car.
async fn car_calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(car_id): Path<CarId>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Json<CalendarResponse>> {
    let (first, last) = month_bounds(query.year, query.month)?;

    let car = load_car_for(&state, car_id, &auth).await?;
    let bookings = BookingRepository::new((*state.db).clone())
        .list_overlapping(first, last, Some(car.id))
        .await?;

    let days = month_occupancy(&bookings, query.year, query.month)?;
    Ok(Json(CalendarResponse {
        car_id: car.id,
        year: query.year,
        month: query.month,
        days,
    }))
}

/// First and last day of a calendar month.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), BookingError> {
    let invalid = BookingError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid.clone())?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(invalid)?;
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, december_end) = month_bounds(2023, 12).unwrap();
        assert_eq!(december_end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        assert_eq!(
            month_bounds(2024, 0),
            Err(BookingError::InvalidMonth { year: 2024, month: 0 })
        );
    }
}
