//! Profile registration and token refresh.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use carrental_core::access::{Role, UserAccount};
use carrental_db::{Registration, UserRepository};
use carrental_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the profile routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_profile).post(register_profile))
        .route("/auth/refresh", post(refresh_token))
}

/// Request body for registering the caller's profile.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: String,
}

/// Re-issued token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Bearer token carrying the current role.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Role baked into the token.
    pub role: Role,
}

/// POST /users/me - Register the caller's profile.
///
/// A pending invitation for the caller's email decides the initial role.
async fn register_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<RegisterProfileRequest>,
) -> ApiResult<(StatusCode, Json<UserAccount>)> {
    payload.validate()?;

    let users = UserRepository::new((*state.db).clone());
    if users.find_by_id(auth.user_id()).await?.is_some() {
        return Err(AppError::Conflict("Profile already registered".to_string()).into());
    }

    let Registration {
        account,
        invitation,
    } = users
        .register(&UserAccount {
            id: auth.user_id(),
            name: payload.name.trim().to_string(),
            email: auth.email().to_string(),
            role: Role::User,
        })
        .await?;

    if let Some(invitation) = invitation {
        info!(user_id = %account.id, invitation_id = %invitation.id, role = %account.role, "Invitation accepted");
    }

    info!(user_id = %account.id, "Profile registered");
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /users/me - The caller's profile.
async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserAccount>> {
    let account = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not registered".to_string()))?;

    Ok(Json(account))
}

/// POST /auth/refresh - Re-issue the caller's token with the role currently on record.
async fn refresh_token(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<TokenResponse>> {
    let account = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not registered".to_string()))?;

    let access_token = state.jwt_service.issue_token(
        account.id.into_inner(),
        &account.email,
        account.role.as_str(),
    )?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        role: account.role,
    }))
}
