//! Car registration and listing.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use carrental_core::access::Action;
use carrental_core::fleet::{Car, NewCar};
use carrental_db::{CarRepository, UserRepository};
use carrental_shared::AppError;
use carrental_shared::types::CarId;
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    error::ApiResult,
    middleware::{AdminUser, AuthUser},
};

/// Creates the car routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/cars", get(list_cars).post(create_car))
}

/// Admin-only car routes (requires auth and admin gate).
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/cars/{car_id}", delete(delete_car))
}

/// Query parameters for listing cars.
#[derive(Debug, Default, Deserialize)]
pub struct ListCarsQuery {
    /// List the whole fleet instead of the caller's cars (admins only).
    #[serde(default)]
    pub all: bool,
}

/// Loads a car the caller may read or write: its owner or an admin.
///
/// Admin access to someone else's car is confirmed against the caller's
/// stored profile.
pub(crate) async fn load_car_for(state: &AppState, car_id: CarId, auth: &AuthUser) -> ApiResult<Car> {
    let car = CarRepository::new((*state.db).clone())
        .find_by_id(car_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Car {car_id} not found")))?;

    if car.is_owned_by(auth.user_id()) {
        return Ok(car);
    }
    if !auth.role().is_admin() || !auth.recorded_role(state).await?.is_some_and(|r| r.is_admin()) {
        return Err(AppError::Forbidden("Car belongs to another user".to_string()).into());
    }
    Ok(car)
}

/// POST /cars - Register a car owned by the caller.
async fn create_car(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NewCar>,
) -> ApiResult<(StatusCode, Json<Car>)> {
    payload.validate()?;

    let owner_name = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .map_or_else(|| auth.email().to_string(), |u| u.name);

    let car = payload.into_car(CarId::new(), auth.user_id(), &owner_name);
    let car = CarRepository::new((*state.db).clone()).create(&car).await?;

    info!(car_id = %car.id, user_id = %car.user_id, "Car created");
    Ok((StatusCode::CREATED, Json(car)))
}

/// GET /cars - The caller's cars, or every car with `?all=true` for admins.
async fn list_cars(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListCarsQuery>,
) -> ApiResult<Json<Vec<Car>>> {
    let repo = CarRepository::new((*state.db).clone());

    let cars = if query.all {
        auth.authorize_current(&state, Action::ViewAdminDashboard).await?;
        repo.list_all().await?
    } else {
        repo.list_by_owner(auth.user_id()).await?
    };

    Ok(Json(cars))
}

/// DELETE /cars/{car_id} - Remove a car with its reports and bookings.
async fn delete_car(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(car_id): Path<CarId>,
) -> ApiResult<StatusCode> {
    admin.authorize(Action::DeleteCar)?;

    if !CarRepository::new((*state.db).clone()).delete(car_id).await? {
        return Err(AppError::NotFound(format!("Car {car_id} not found")).into());
    }

    info!(car_id = %car_id, deleted_by = %admin.user_id(), "Car deleted");
    Ok(StatusCode::NO_CONTENT)
}
