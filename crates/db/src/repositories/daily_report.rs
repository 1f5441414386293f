//! Daily report repository.
//!
//! Reads hand back `RawDailyReport`; typing happens in the core crate.

use carrental_core::reports::{DailyReport, RawDailyReport};
use carrental_shared::types::{CarId, PageRequest, ReportId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::daily_reports;

impl From<daily_reports::Model> for RawDailyReport {
    fn from(model: daily_reports::Model) -> Self {
        Self {
            id: ReportId::from_uuid(model.id),
            car_id: CarId::from_uuid(model.car_id),
            user_id: UserId::from_uuid(model.user_id),
            transaction_date: model.transaction_date,
            destination: model.destination,
            rental_rate_amount: model.rental_rate_amount,
            number_of_rental_days: model.number_of_rental_days,
            paid_amount: model.paid_amount,
            driver_income: model.driver_income,
            car_expense: model.car_expense,
            expense_description: model.expense_description,
            comments: model.comments,
        }
    }
}

/// Repository for the `daily_reports` collection.
#[derive(Debug, Clone)]
pub struct DailyReportRepository {
    db: DatabaseConnection,
}

impl DailyReportRepository {
    /// Creates a new daily report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a validated report.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, report: &DailyReport) -> Result<RawDailyReport, DbErr> {
        let raw = RawDailyReport::from(report);
        daily_reports::ActiveModel {
            id: Set(raw.id.into_inner()),
            car_id: Set(raw.car_id.into_inner()),
            user_id: Set(raw.user_id.into_inner()),
            transaction_date: Set(raw.transaction_date),
            destination: Set(raw.destination),
            rental_rate_amount: Set(raw.rental_rate_amount),
            number_of_rental_days: Set(raw.number_of_rental_days),
            paid_amount: Set(raw.paid_amount),
            driver_income: Set(raw.driver_income),
            car_expense: Set(raw.car_expense),
            expense_description: Set(raw.expense_description),
            comments: Set(raw.comments),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map(RawDailyReport::from)
    }

    /// Every stored record for a car.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_car(&self, car_id: CarId) -> Result<Vec<RawDailyReport>, DbErr> {
        let rows = daily_reports::Entity::find()
            .filter(daily_reports::Column::CarId.eq(car_id.into_inner()))
            .order_by_asc(daily_reports::Column::CreatedAt)
            .all(&self.db)
            .await?;

        tracing::debug!(car_id = %car_id, count = rows.len(), "Loaded daily reports");
        Ok(rows.into_iter().map(RawDailyReport::from).collect())
    }

    /// One page of a car's records, newest first, with the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_page_by_car(
        &self,
        car_id: CarId,
        page: &PageRequest,
    ) -> Result<(Vec<RawDailyReport>, u64), DbErr> {
        let filter = daily_reports::Column::CarId.eq(car_id.into_inner());

        let total = daily_reports::Entity::find()
            .filter(filter.clone())
            .count(&self.db)
            .await?;

        let rows = daily_reports::Entity::find()
            .filter(filter)
            .order_by_desc(daily_reports::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows.into_iter().map(RawDailyReport::from).collect(), total))
    }
}
