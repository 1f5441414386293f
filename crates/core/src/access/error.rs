//! Access error types.

use thiserror::Error;

use super::types::{Action, Role};

/// Errors raised by the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Caller's role does not permit the action.
    #[error("Role {role} may not {action}")]
    Forbidden {
        /// Caller role.
        role: Role,
        /// Attempted action.
        action: Action,
    },

    /// Target account can never have its role lowered.
    #[error("Role {0} cannot be demoted")]
    ProtectedRole(Role),

    /// Invitations may only grant `user` or `admin`.
    #[error("Invitations cannot grant role {0}")]
    InvalidInvitationRole(Role),

    /// Invitation email is malformed.
    #[error("Invalid invitation email: {0}")]
    InvalidEmail(String),
}

impl AccessError {
    /// Returns true when the caller lacks permission, as opposed to a rule on the target.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_message() {
        let err = AccessError::Forbidden {
            role: Role::User,
            action: Action::DeleteCar,
        };
        assert!(err.is_forbidden());
        assert_eq!(err.to_string(), "Role user may not delete cars");
    }

    #[test]
    fn test_protected_role_is_not_forbidden() {
        let err = AccessError::ProtectedRole(Role::Supreme);
        assert!(!err.is_forbidden());
        assert!(err.to_string().contains("supreme"));
    }
}
