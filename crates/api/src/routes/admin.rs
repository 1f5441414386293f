//! Admin dashboard: user roles and invitations.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use carrental_core::access::{
    AccessGate, Action, Invitation, NewInvitation, RoleChange, RoleTransition, UserAccount,
};
use carrental_db::{InvitationRepository, UserRepository};
use carrental_shared::AppError;
use carrental_shared::types::{InvitationId, UserId};
use serde::Serialize;
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::AdminUser};

/// Creates the admin routes (requires auth middleware and the admin gate).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{user_id}/promote", post(promote_user))
        .route("/admin/users/{user_id}/demote", post(demote_user))
        .route(
            "/admin/invitations",
            get(list_invitations).post(create_invitation),
        )
        .route(
            "/admin/invitations/{invitation_id}",
            delete(revoke_invitation),
        )
}

/// Outcome of a promote or demote request.
#[derive(Debug, Serialize)]
pub struct RoleChangeResponse {
    /// Account after the change.
    pub user: UserAccount,
    /// Role before and after.
    pub transition: RoleTransition,
    /// False when the account already had the resulting role.
    pub changed: bool,
}

/// GET /admin/users - Every registered profile.
async fn list_users(State(state): State<AppState>, admin: AdminUser) -> ApiResult<Json<Vec<UserAccount>>> {
    admin.authorize(Action::ViewAdminDashboard)?;
    let users = UserRepository::new((*state.db).clone()).list_all().await?;
    Ok(Json(users))
}

/// POST /admin/users/{user_id}/promote
async fn promote_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<RoleChangeResponse>> {
    change_role(&state, &admin, user_id, RoleChange::Promote).await
}

/// POST /admin/users/{user_id}/demote
async fn demote_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<RoleChangeResponse>> {
    change_role(&state, &admin, user_id, RoleChange::Demote).await
}

async fn change_role(
    state: &AppState,
    admin: &AdminUser,
    user_id: UserId,
    change: RoleChange,
) -> ApiResult<Json<RoleChangeResponse>> {
    let users = UserRepository::new((*state.db).clone());
    let target = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let transition = AccessGate::plan_role_change(admin.role(), target.role, change)?;
    if transition.is_noop() {
        return Ok(Json(RoleChangeResponse {
            user: target,
            transition,
            changed: false,
        }));
    }

    let user = users.update_role(user_id, transition.to).await?;
    info!(
        user_id = %user_id,
        from = %transition.from,
        to = %transition.to,
        changed_by = %admin.user_id(),
        "User role changed"
    );

    Ok(Json(RoleChangeResponse {
        user,
        transition,
        changed: true,
    }))
}

/// POST /admin/invitations - Invite an email with a role.
async fn create_invitation(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<NewInvitation>,
) -> ApiResult<(StatusCode, Json<Invitation>)> {
    admin.authorize(Action::ManageInvitations)?;
    let email = payload.validate()?;

    let repo = InvitationRepository::new((*state.db).clone());
    if repo.find_pending_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(format!("{email} already has a pending invitation")).into());
    }

    let invitation = repo.create(&email, payload.role, admin.user_id()).await?;
    info!(invitation_id = %invitation.id, role = %invitation.role, "Invitation created");
    Ok((StatusCode::CREATED, Json(invitation)))
}

/// GET /admin/invitations
async fn list_invitations(
    State(state): State<AppState>,
    admin: AdminUser,
) -> ApiResult<Json<Vec<Invitation>>> {
    admin.authorize(Action::ManageInvitations)?;
    let invitations = InvitationRepository::new((*state.db).clone()).list_all().await?;
    Ok(Json(invitations))
}

/// DELETE /admin/invitations/{invitation_id}
async fn revoke_invitation(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(invitation_id): Path<InvitationId>,
) -> ApiResult<StatusCode> {
    admin.authorize(Action::ManageInvitations)?;

    if !InvitationRepository::new((*state.db).clone())
        .delete(invitation_id)
        .await?
    {
        return Err(AppError::NotFound(format!("Invitation {invitation_id} not found")).into());
    }

    info!(invitation_id = %invitation_id, revoked_by = %admin.user_id(), "Invitation revoked");
    Ok(StatusCode::NO_CONTENT)
}
