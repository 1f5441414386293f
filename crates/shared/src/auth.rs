//! Claims carried by bearer tokens from the authentication provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// `role` mirrors the `Users` record at issue time; `admin` is the provider's
/// custom boolean claim and is true for `admin` and `supreme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Email the identity signed in with.
    pub email: String,
    /// User's role (`user`, `admin` or `supreme`).
    #[serde(default = "default_role")]
    pub role: String,
    /// Custom admin claim.
    #[serde(default)]
    pub admin: bool,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

fn default_role() -> String {
    "user".to_string()
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, email: &str, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.to_string(),
            role: role.to_string(),
            admin: matches!(role, "admin" | "supreme"),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}
