//! Core business logic for CarRental.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `reports` - Daily transaction reports, monthly aggregation and yearly rollup
//! - `bookings` - Rental bookings, date conflict filtering and occupancy calendar
//! - `access` - User roles, the authorization gate and role invitations
//! - `fleet` - Cars and their owners

pub mod access;
pub mod bookings;
pub mod fleet;
pub mod reports;
