//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token authentication and the admin gate
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use carrental_core::reports::ReportSettings;
use carrental_shared::{CaptchaVerifier, FormRelay, JwtService};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Verifies and re-issues bearer tokens.
    pub jwt_service: Arc<JwtService>,
    /// Human verification for public and report-entry forms.
    pub captcha: Arc<CaptchaVerifier>,
    /// Mirrors booking submissions to the form-intake endpoint.
    pub form_relay: Arc<FormRelay>,
    /// Salary, fee rate and target used by the report views.
    pub report_settings: Arc<ReportSettings>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
