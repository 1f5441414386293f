//! `SeaORM` Entity for daily_reports table.
//!
//! Numeric columns are nullable and `transaction_date` is free text: rows are
//! validated when read, not when written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub transaction_date: String,
    pub destination: Option<String>,
    pub rental_rate_amount: Option<Decimal>,
    pub number_of_rental_days: Option<i32>,
    pub paid_amount: Option<Decimal>,
    pub driver_income: Option<Decimal>,
    pub car_expense: Option<Decimal>,
    pub expense_description: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::CarId",
        to = "super::cars::Column::Id"
    )]
    Cars,
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cars.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
