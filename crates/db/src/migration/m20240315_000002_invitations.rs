//! Invitations migration.
//!
//! Creates the invitations table for roles granted ahead of registration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INVITATIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS invitations CASCADE;")
            .await?;
        Ok(())
    }
}

const INVITATIONS_SQL: &str = r"
CREATE TABLE invitations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL,
    role VARCHAR(20) NOT NULL DEFAULT 'user',
    invited_by UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    accepted_at TIMESTAMPTZ,
    CONSTRAINT chk_invitation_role CHECK (role IN ('user', 'admin')),
    CONSTRAINT chk_invitation_status CHECK (status IN ('pending', 'accepted'))
);

-- One pending invitation per email
CREATE UNIQUE INDEX idx_invitations_pending_email ON invitations(email) WHERE status = 'pending';
";
