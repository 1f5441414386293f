//! Role authorization gate.
//!
//! Only `admin` and `supreme` pass the gate. `supreme` accounts can never be
//! demoted, whoever asks. Promote and demote are idempotent.

use serde::{Deserialize, Serialize};

use super::error::AccessError;
use super::types::{Action, Role};

/// Direction of a role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleChange {
    /// `user` to `admin`.
    Promote,
    /// `admin` to `user`.
    Demote,
}

impl RoleChange {
    fn action(self) -> Action {
        match self {
            Self::Promote => Action::PromoteUser,
            Self::Demote => Action::DemoteUser,
        }
    }
}

/// Outcome of a planned role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTransition {
    /// Role before.
    pub from: Role,
    /// Role after.
    pub to: Role,
}

impl RoleTransition {
    /// Returns true when nothing needs to be written.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Authorization predicates over roles.
pub struct AccessGate;

impl AccessGate {
    /// Returns true if `role` may perform `action`.
    #[must_use]
    pub fn permits(role: Role, action: Action) -> bool {
        match action {
            Action::ViewAdminDashboard
            | Action::DeleteCar
            | Action::PromoteUser
            | Action::DemoteUser
            | Action::ManageInvitations => role.is_admin(),
        }
    }

    /// Checks `role` against `action`.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Forbidden` when the role is too low.
    pub fn authorize(role: Role, action: Action) -> Result<(), AccessError> {
        if Self::permits(role, action) {
            Ok(())
        } else {
            Err(AccessError::Forbidden { role, action })
        }
    }

    /// Checks the role held by the caller's stored profile against `action`.
    ///
    /// A caller without a profile counts as `user`. Returns the role that
    /// was checked.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Forbidden` when the stored role is too low.
    pub fn authorize_recorded(recorded: Option<Role>, action: Action) -> Result<Role, AccessError> {
        let role = recorded.unwrap_or_default();
        Self::authorize(role, action)?;
        Ok(role)
    }

    /// Returns true if `actor` may demote an account currently holding `target`.
    #[must_use]
    pub fn can_demote(actor: Role, target: Role) -> bool {
        Self::permits(actor, Action::DemoteUser) && target != Role::Supreme
    }

    /// Works out the role change for a target account.
    ///
    /// Promoting an `admin` or `supreme` and demoting a `user` are no-ops.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the actor is not an admin and `ProtectedRole`
    /// when demoting a `supreme` account.
    pub fn plan_role_change(
        actor: Role,
        target: Role,
        change: RoleChange,
    ) -> Result<RoleTransition, AccessError> {
        Self::authorize(actor, change.action())?;

        let to = match (change, target) {
            (RoleChange::Demote, Role::Supreme) => return Err(AccessError::ProtectedRole(target)),
            (RoleChange::Promote, Role::User) => Role::Admin,
            (RoleChange::Demote, Role::Admin) => Role::User,
            (_, unchanged) => unchanged,
        };

        Ok(RoleTransition { from: target, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 5] = [
        Action::ViewAdminDashboard,
        Action::DeleteCar,
        Action::PromoteUser,
        Action::DemoteUser,
        Action::ManageInvitations,
    ];

    #[test]
    fn test_only_admins_pass() {
        for action in ALL_ACTIONS {
            assert!(!AccessGate::permits(Role::User, action));
            assert!(AccessGate::permits(Role::Admin, action));
            assert!(AccessGate::permits(Role::Supreme, action));
        }
    }

    #[test]
    fn test_authorize_reports_role_and_action() {
        assert_eq!(
            AccessGate::authorize(Role::User, Action::ManageInvitations),
            Err(AccessError::Forbidden {
                role: Role::User,
                action: Action::ManageInvitations
            })
        );
        assert!(AccessGate::authorize(Role::Admin, Action::DeleteCar).is_ok());
    }

    #[test]
    fn test_supreme_never_demotable() {
        assert!(!AccessGate::can_demote(Role::Admin, Role::Supreme));
        assert!(!AccessGate::can_demote(Role::Supreme, Role::Supreme));
        assert_eq!(
            AccessGate::plan_role_change(Role::Admin, Role::Supreme, RoleChange::Demote),
            Err(AccessError::ProtectedRole(Role::Supreme))
        );
        assert_eq!(
            AccessGate::plan_role_change(Role::Supreme, Role::Supreme, RoleChange::Demote),
            Err(AccessError::ProtectedRole(Role::Supreme))
        );
    }

    #[test]
    fn test_user_cannot_change_roles() {
        let err = AccessGate::plan_role_change(Role::User, Role::User, RoleChange::Promote).unwrap_err();
        assert!(err.is_forbidden());
        assert!(!AccessGate::can_demote(Role::User, Role::Admin));
    }

    #[test]
    fn test_promote_and_demote() {
        let promoted = AccessGate::plan_role_change(Role::Admin, Role::User, RoleChange::Promote).unwrap();
        assert_eq!(promoted, RoleTransition { from: Role::User, to: Role::Admin });
        assert!(!promoted.is_noop());

        let demoted = AccessGate::plan_role_change(Role::Supreme, Role::Admin, RoleChange::Demote).unwrap();
        assert_eq!(demoted.to, Role::User);
    }

    #[test]
    fn test_idempotent_changes_are_noops() {
        for (target, change) in [
            (Role::Admin, RoleChange::Promote),
            (Role::Supreme, RoleChange::Promote),
            (Role::User, RoleChange::Demote),
        ] {
            let transition = AccessGate::plan_role_change(Role::Admin, target, change).unwrap();
            assert!(transition.is_noop(), "{target} {change:?}");
        }
    }

    #[test]
    fn test_authorize_recorded_uses_stored_role() {
        assert_eq!(
            AccessGate::authorize_recorded(Some(Role::User), Action::DemoteUser),
            Err(AccessError::Forbidden {
                role: Role::User,
                action: Action::DemoteUser
            })
        );
        assert!(AccessGate::authorize_recorded(None, Action::DeleteCar).unwrap_err().is_forbidden());
        assert_eq!(
            AccessGate::authorize_recorded(Some(Role::Supreme), Action::ManageInvitations),
            Ok(Role::Supreme)
        );
    }
}
