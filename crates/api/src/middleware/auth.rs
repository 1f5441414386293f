//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use carrental_core::access::{AccessError, AccessGate, Action, Role};
use carrental_db::UserRepository;
use carrental_shared::types::UserId;
use carrental_shared::{AppError, Claims};

use crate::{AppState, error::{ApiError, ApiResult}};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return ApiError(AppError::Unauthorized(
            "Authorization header with Bearer token is required".to_string(),
        ))
        .into_response();
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::from(e).into_response()
        }
    }
}

/// Admin gate for `/admin` and other admin-only routes.
///
/// Must run after `auth_middleware`. The token's role screens the request
/// first; the role on the caller's stored profile then decides. Callers
/// below `admin` get 403. Passing requests carry an [`AdminUser`].
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(claims) = request.extensions().get::<Claims>() else {
        return ApiError(AppError::Unauthorized("Authentication required".to_string()))
            .into_response();
    };

    let user = AuthUser(claims.clone());
    match user.authorize_current(&state, Action::ViewAdminDashboard).await {
        Ok(role) => {
            request.extensions_mut().insert(AdminUser { user, role });
            next.run(request).await
        }
        Err(e) => {
            tracing::info!(user_id = %user.user_id(), claimed_role = %user.role(), "Admin gate denied request");
            e.into_response()
        }
    }
}

/// Extractor for authenticated user claims.
///
/// ```ignore
/// async fn handler(user: AuthUser) -> impl IntoResponse {
///     let user_id = user.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.0.user_id())
    }

    /// Returns the email the caller signed in with.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Effective role: the `role` claim, raised to `admin` when the
    /// provider's `admin` claim is set.
    #[must_use]
    pub fn role(&self) -> Role {
        let role = Role::parse_lossy(&self.0.role);
        if self.0.admin && !role.is_admin() {
            Role::Admin
        } else {
            role
        }
    }

    /// Checks the caller's role against a gated action.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Forbidden` when the role is too low.
    pub fn authorize(&self, action: Action) -> Result<(), AccessError> {
        AccessGate::authorize(self.role(), action)
    }

    /// Role on the caller's stored profile, if one is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile lookup fails.
    pub async fn recorded_role(&self, state: &AppState) -> ApiResult<Option<Role>> {
        Ok(UserRepository::new((*state.db).clone())
            .find_by_id(self.user_id())
            .await?
            .map(|account| account.role))
    }

    /// Checks an action against the token role, then against the stored
    /// profile's role, and returns the stored role.
    ///
    /// # Errors
    ///
    /// Returns 403 when either role is too low and a database error if the
    /// profile lookup fails.
    pub async fn authorize_current(&self, state: &AppState, action: Action) -> ApiResult<Role> {
        self.authorize(action)?;
        let recorded = self.recorded_role(state).await?;
        Ok(AccessGate::authorize_recorded(recorded, action)?)
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

/// Caller that passed `require_admin`, with the role from their stored profile.
#[derive(Debug, Clone)]
pub struct AdminUser {
    user: AuthUser,
    role: Role,
}

impl AdminUser {
    /// Returns the caller's user ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.user_id()
    }

    /// Role held by the stored profile when the request came in.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Checks the stored role against a gated action.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Forbidden` when the role is too low.
    pub fn authorize(&self, action: Action) -> Result<(), AccessError> {
        AccessGate::authorize(self.role, action)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError(AppError::Forbidden("Admin access required".to_string())))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn user_with(role: &str, admin: bool) -> AuthUser {
        let mut claims = Claims::new(Uuid::nil(), "a@b.co", role, Utc::now() + Duration::hours(1));
        claims.admin = admin;
        AuthUser(claims)
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_effective_role() {
        assert_eq!(user_with("user", false).role(), Role::User);
        assert_eq!(user_with("user", true).role(), Role::Admin);
        assert_eq!(user_with("supreme", true).role(), Role::Supreme);
        assert_eq!(user_with("nonsense", false).role(), Role::User);
    }

    #[test]
    fn test_authorize() {
        assert!(user_with("user", false).authorize(Action::DeleteCar).is_err());
        assert!(user_with("admin", true).authorize(Action::DeleteCar).is_ok());
    }
}
