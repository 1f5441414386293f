//! Daily transaction reports and the financial summaries built from them.
//!
//! This module provides pure business logic for:
//! - Daily report entry validation (overpayment, non-positive amounts)
//! - Store-boundary conversion of loosely typed records
//! - Monthly aggregation per calendar month
//! - Yearly rollup against the annual rental target
//! - The 12-row year table rendered on the dashboards

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
pub use validation::validate_new_report;
