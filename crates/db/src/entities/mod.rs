//! `SeaORM` entity definitions, one per collection.

pub mod cars;
pub mod daily_reports;
pub mod invitations;
pub mod rental_bookings;
pub mod users;

pub mod prelude {
    //! Entity re-exports.
    pub use super::cars::Entity as Cars;
    pub use super::daily_reports::Entity as DailyReports;
    pub use super::invitations::Entity as Invitations;
    pub use super::rental_bookings::Entity as RentalBookings;
    pub use super::users::Entity as Users;
}
