//! Car repository for database operations.

use carrental_core::fleet::Car;
use carrental_shared::types::{CarId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::cars;

impl From<cars::Model> for Car {
    fn from(model: cars::Model) -> Self {
        Self {
            id: CarId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            user_name: model.user_name,
            car_name: model.car_name,
            car_type: model.car_type,
        }
    }
}

/// Car repository for the `cars` collection.
#[derive(Debug, Clone)]
pub struct CarRepository {
    db: DatabaseConnection,
}

impl CarRepository {
    /// Creates a new car repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a car.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, car: &Car) -> Result<Car, DbErr> {
        cars::ActiveModel {
            id: Set(car.id.into_inner()),
            user_id: Set(car.user_id.into_inner()),
            user_name: Set(car.user_name.clone()),
            car_name: Set(car.car_name.clone()),
            car_type: Set(car.car_type.clone()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map(Car::from)
    }

    /// Finds a car by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, DbErr> {
        Ok(cars::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Car::from))
    }

    /// Lists the cars owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Car>, DbErr> {
        Ok(cars::Entity::find()
            .filter(cars::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(cars::Column::CarName)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Car::from)
            .collect())
    }

    /// Lists every car in the fleet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<Car>, DbErr> {
        Ok(cars::Entity::find()
            .order_by_asc(cars::Column::UserName)
            .order_by_asc(cars::Column::CarName)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Car::from)
            .collect())
    }

    /// Deletes a car. Its reports and bookings go with it.
    ///
    /// Returns false if no car had that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: CarId) -> Result<bool, DbErr> {
        let result = cars::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
