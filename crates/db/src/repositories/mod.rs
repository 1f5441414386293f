//! Repository abstractions for data access.
//!
//! One repository per collection. Each converts rows to and from the core
//! domain types so the rest of the application never sees `SeaORM` models.

pub mod booking;
pub mod car;
pub mod daily_report;
pub mod invitation;
pub mod user;

pub use booking::BookingRepository;
pub use car::CarRepository;
pub use daily_report::DailyReportRepository;
pub use invitation::InvitationRepository;
pub use user::{Registration, UserRepository};
