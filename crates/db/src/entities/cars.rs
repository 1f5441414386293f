//! `SeaORM` Entity for cars table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub car_name: String,
    pub car_type: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::daily_reports::Entity")]
    DailyReports,
    #[sea_orm(has_many = "super::rental_bookings::Entity")]
    RentalBookings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::daily_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReports.def()
    }
}

impl Related<super::rental_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalBookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
