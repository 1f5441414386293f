//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::auth::{auth_middleware, require_admin},
};

pub mod admin;
pub mod bookings;
pub mod cars;
pub mod health;
pub mod reports;
pub mod users;


/// Creates the API router: public, authenticated and admin-only routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Admin routes: authenticated, then gated on role
    let admin_routes = Router::new()
        .merge(admin::routes())
        .merge(cars::admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(cars::routes())
        .merge(reports::routes())
        .merge(bookings::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(bookings::public_routes())
        .merge(protected_routes)
        .merge(admin_routes)
}
