//! Request middleware.

pub mod auth;

pub use auth::{AdminUser, AuthUser, auth_middleware, require_admin};
