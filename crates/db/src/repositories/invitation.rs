//! Invitation repository.

use carrental_core::access::{Invitation, InvitationStatus, Role};
use carrental_shared::types::{InvitationId, UserId};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::invitations;

impl From<invitations::Model> for Invitation {
    fn from(model: invitations::Model) -> Self {
        Self {
            id: InvitationId::from_uuid(model.id),
            email: model.email,
            role: Role::parse_lossy(&model.role),
            invited_by: UserId::from_uuid(model.invited_by),
            status: InvitationStatus::parse_lossy(&model.status),
            created_at: DateTime::<Utc>::from(model.created_at),
        }
    }
}

/// Repository for the `invitations` collection.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    db: DatabaseConnection,
}

impl InvitationRepository {
    /// Creates a new invitation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a pending invitation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the email
    /// already has a pending invitation.
    pub async fn create(&self, email: &str, role: Role, invited_by: UserId) -> Result<Invitation, DbErr> {
        invitations::ActiveModel {
            id: Set(InvitationId::new().into_inner()),
            email: Set(email.to_string()),
            role: Set(role.as_str().to_string()),
            invited_by: Set(invited_by.into_inner()),
            status: Set(InvitationStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now().into()),
            accepted_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map(Invitation::from)
    }

    /// Lists invitations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<Invitation>, DbErr> {
        Ok(invitations::Entity::find()
            .order_by_desc(invitations::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Invitation::from)
            .collect())
    }

    /// The pending invitation for `email`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_pending_by_email(&self, email: &str) -> Result<Option<Invitation>, DbErr> {
        Ok(invitations::Entity::find()
            .filter(invitations::Column::Email.eq(email.trim().to_lowercase()))
            .filter(invitations::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .one(&self.db)
            .await?
            .map(Invitation::from))
    }

    /// Marks an invitation accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_accepted(&self, id: InvitationId) -> Result<Invitation, DbErr> {
        invitations::ActiveModel {
            id: Set(id.into_inner()),
            status: Set(InvitationStatus::Accepted.as_str().to_string()),
            accepted_at: Set(Some(Utc::now().into())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map(Invitation::from)
    }

    /// Revokes an invitation. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: InvitationId) -> Result<bool, DbErr> {
        let result = invitations::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
