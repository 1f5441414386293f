//! Database migration runner for CarRental.
//!
//! Usage:
//!   migrator up      - Create users, cars, daily reports, bookings and invitations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads `DATABASE_URL` (a `.env` file is honoured).

use carrental_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
