//! Shared types, errors, and configuration for CarRental.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - Bearer token claims issued by the authentication provider
//! - Clients for the human-verification challenge and the booking form relay

pub mod auth;
pub mod captcha;
pub mod config;
pub mod error;
pub mod form_relay;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use captcha::{CaptchaError, CaptchaVerifier};
pub use config::{AppConfig, CaptchaConfig, EmptyMonthSalary, FormRelayConfig, ReportsConfig};
pub use error::{AppError, AppResult};
pub use form_relay::{FormRelay, FormRelayError};
pub use jwt::{JwtConfig, JwtError, JwtService};
