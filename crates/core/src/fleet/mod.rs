//! Cars and their owners.

use carrental_shared::types::{CarId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Car entry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A registered vehicle, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Car ID.
    pub id: CarId,
    /// Owner.
    pub user_id: UserId,
    /// Owner display name at registration.
    pub user_name: String,
    /// Make and model, e.g. "Toyota Axio".
    pub car_name: String,
    /// Body type, e.g. "Sedan".
    pub car_type: String,
}

impl Car {
    /// Returns true if `user_id` owns this car.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Input for registering a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCar {
    /// Make and model.
    pub car_name: String,
    /// Body type.
    pub car_type: String,
}

impl NewCar {
    /// Checks that name and type are present.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::MissingField` for the first blank field.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.car_name.trim().is_empty() {
            return Err(FleetError::MissingField("car_name"));
        }
        if self.car_type.trim().is_empty() {
            return Err(FleetError::MissingField("car_type"));
        }
        Ok(())
    }

    /// Builds the car for `owner`.
    #[must_use]
    pub fn into_car(self, id: CarId, owner: UserId, owner_name: &str) -> Car {
        Car {
            id,
            user_id: owner,
            user_name: owner_name.to_string(),
            car_name: self.car_name.trim().to_string(),
            car_type: self.car_type.trim().to_string(),
        }
    }
}
