//! Access domain types.

use std::fmt;

use carrental_shared::types::{InvitationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::AccessError;

/// User role.
///
/// Ordered from lowest to highest privilege.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular driver or owner account.
    #[default]
    User,
    /// Fleet administrator.
    Admin,
    /// Administrator that can never be demoted.
    Supreme,
}

impl Role {
    /// Parses a role, treating anything unrecognised as `User`.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" => Self::Admin,
            "supreme" => Self::Supreme,
            _ => Self::User,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Supreme => "supreme",
        }
    }

    /// Returns true for `admin` and `supreme`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Supreme)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions behind the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Open the admin dashboard (user list, all cars).
    ViewAdminDashboard,
    /// Delete a car and its history.
    DeleteCar,
    /// Raise a user to admin.
    PromoteUser,
    /// Lower an admin to user.
    DemoteUser,
    /// Create, list or revoke invitations.
    ManageInvitations,
}

impl Action {
    fn describe(self) -> &'static str {
        match self {
            Self::ViewAdminDashboard => "view the admin dashboard",
            Self::DeleteCar => "delete cars",
            Self::PromoteUser => "promote users",
            Self::DemoteUser => "demote users",
            Self::ManageInvitations => "manage invitations",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A registered profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// User ID, shared with the auth provider subject.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Current role.
    pub role: Role,
}

/// Invitation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Waiting for the invitee to register.
    Pending,
    /// Applied on registration.
    Accepted,
}

impl InvitationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    /// Parses a stored status, defaulting to `Pending`.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("accepted") {
            Self::Accepted
        } else {
            Self::Pending
        }
    }
}

/// Role granted to an email before its owner registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Invitation ID.
    pub id: InvitationId,
    /// Invited email, lowercased.
    pub email: String,
    /// Role applied on registration.
    pub role: Role,
    /// Admin that sent it.
    pub invited_by: UserId,
    /// Pending or accepted.
    pub status: InvitationStatus,
    /// When it was sent.
    pub created_at: DateTime<Utc>,
}

/// Input for a new invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvitation {
    /// Email to invite.
    pub email: String,
    /// Role to grant.
    #[serde(default)]
    pub role: Role,
}

impl NewInvitation {
    /// Validates the invitation and returns the normalized email.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmail` for a malformed address and
    /// `InvalidInvitationRole` when asked to grant `supreme`.
    pub fn validate(&self) -> Result<String, AccessError> {
        let email = self.email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(AccessError::InvalidEmail(self.email.clone()));
        }
        if self.role == Role::Supreme {
            return Err(AccessError::InvalidInvitationRole(self.role));
        }
        Ok(email)
    }
}
