//! User repository for database operations.

use carrental_core::access::{Invitation, InvitationStatus, Role, UserAccount};
use carrental_shared::types::UserId;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::entities::{invitations, users};

impl From<users::Model> for UserAccount {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            role: Role::parse_lossy(&model.role),
        }
    }
}

/// A newly registered profile and the invitation it consumed, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Stored profile.
    pub account: UserAccount,
    /// Invitation that decided the role, now accepted.
    pub invitation: Option<Invitation>,
}

/// User repository for the `users` collection.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, DbErr> {
        Ok(users::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(UserAccount::from))
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DbErr> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await?
            .map(UserAccount::from))
    }

    /// Lists every registered user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<UserAccount>, DbErr> {
        Ok(users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(UserAccount::from)
            .collect())
    }

    /// Creates a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, account: &UserAccount) -> Result<UserAccount, DbErr> {
        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(account.id.into_inner()),
            name: Set(account.name.clone()),
            email: Set(account.email.trim().to_lowercase()),
            role: Set(account.role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await.map(UserAccount::from)
    }

    /// Registers a profile, applying and accepting the pending invitation
    /// for its email in the same database transaction.
    ///
    /// Without an invitation the profile gets `account.role`.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written then.
    pub async fn register(&self, account: &UserAccount) -> Result<Registration, DbErr> {
        let email = account.email.trim().to_lowercase();
        let txn = self.db.begin().await?;

        let pending = invitations::Entity::find()
            .filter(invitations::Column::Email.eq(email.as_str()))
            .filter(invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .one(&txn)
            .await?;

        let invitation = match pending {
            Some(model) => Some(
                invitations::ActiveModel {
                    id: Set(model.id),
                    status: Set(InvitationStatus::Accepted.as_str().to_string()),
                    accepted_at: Set(Some(Utc::now().into())),
                    ..Default::default()
                }
                .update(&txn)
                .await
                .map(Invitation::from)?,
            ),
            None => None,
        };

        let role = invitation.as_ref().map_or(account.role, |i| i.role);
        let now = Utc::now().into();
        let stored = users::ActiveModel {
            id: Set(account.id.into_inner()),
            name: Set(account.name.clone()),
            email: Set(email),
            role: Set(role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map(UserAccount::from)?;

        txn.commit().await?;

        Ok(Registration {
            account: stored,
            invitation,
        })
    }

    /// Sets a user's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails or the user does not exist.
    pub async fn update_role(&self, id: UserId, role: Role) -> Result<UserAccount, DbErr> {
        users::ActiveModel {
            id: Set(id.into_inner()),
            role: Set(role.as_str().to_string()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map(UserAccount::from)
    }
}
