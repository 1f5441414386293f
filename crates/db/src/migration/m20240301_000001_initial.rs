//! Initial database migration.
//!
//! Creates the users, cars, daily_reports and rental_bookings tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CARS_SQL).await?;
        db.execute_unprepared(DAILY_REPORTS_SQL).await?;
        db.execute_unprepared(RENTAL_BOOKINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    role VARCHAR(20) NOT NULL DEFAULT 'user',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_role ON users(role);
";

const CARS_SQL: &str = r"
CREATE TABLE cars (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    user_name VARCHAR(255) NOT NULL,
    car_name VARCHAR(255) NOT NULL,
    car_type VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_cars_user ON cars(user_id);
";

// Document-style: nothing beyond the keys is enforced, rows are validated on read.
const DAILY_REPORTS_SQL: &str = r"
CREATE TABLE daily_reports (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    car_id UUID NOT NULL REFERENCES cars(id) ON DELETE CASCADE,
    user_id UUID NOT NULL,
    transaction_date VARCHAR(64) NOT NULL DEFAULT '',
    destination TEXT,
    rental_rate_amount NUMERIC(19, 4),
    number_of_rental_days INTEGER,
    paid_amount NUMERIC(19, 4),
    driver_income NUMERIC(19, 4),
    car_expense NUMERIC(19, 4),
    expense_description TEXT,
    comments TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_daily_reports_car ON daily_reports(car_id, created_at DESC);
";

const RENTAL_BOOKINGS_SQL: &str = r"
CREATE TABLE rental_bookings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    car_id UUID NOT NULL REFERENCES cars(id) ON DELETE CASCADE,
    car_name VARCHAR(255) NOT NULL,
    car_type VARCHAR(100) NOT NULL,
    start_date DATE NOT NULL,
    start_time TIME NOT NULL,
    end_date DATE NOT NULL,
    end_time TIME NOT NULL,
    destination TEXT NOT NULL,
    contact_name VARCHAR(255) NOT NULL,
    contact_email VARCHAR(255) NOT NULL,
    contact_phone VARCHAR(50),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Covers the date-containment filter
CREATE INDEX idx_rental_bookings_range ON rental_bookings(start_date, end_date);
CREATE INDEX idx_rental_bookings_car ON rental_bookings(car_id, start_date);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS rental_bookings CASCADE;
DROP TABLE IF EXISTS daily_reports CASCADE;
DROP TABLE IF EXISTS cars CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
