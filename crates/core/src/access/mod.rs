//! User roles and the authorization gate.
//!
//! # Modules
//!
//! - `types` - Roles, gated actions, accounts and invitations
//! - `error` - Access errors
//! - `gate` - Role checks and promote/demote planning

pub mod error;
pub mod gate;
pub mod types;

pub use error::AccessError;
pub use gate::{AccessGate, RoleChange, RoleTransition};
pub use types::{Action, Invitation, InvitationStatus, NewInvitation, Role, UserAccount};
