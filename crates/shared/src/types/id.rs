//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `CarId` where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(
    UserId,
    "Identity of a user, as issued by the authentication provider."
);
typed_id!(CarId, "Unique identifier for a registered car.");
typed_id!(ReportId, "Unique identifier for a daily transaction report.");
typed_id!(BookingId, "Unique identifier for a rental booking.");
typed_id!(InvitationId, "Unique identifier for a role invitation.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = CarId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(CarId::from(uuid), id);
    }

    #[test]
    fn test_typed_id_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(UserId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    #[test]
    fn test_typed_id_from_str() {
        let uuid = Uuid::new_v4();
        let id = ReportId::from_str(&uuid.to_string()).unwrap();
        assert_eq!(id.into_inner(), uuid);
        assert!(BookingId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(InvitationId::new(), InvitationId::new());
    }

    #[test]
    fn test_typed_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&CarId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
