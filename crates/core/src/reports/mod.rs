//! Report aggregation and document assembly.
//!
//! This module provides the business logic for generating back-office
//! reports:
//! - Financial (transactions, category breakdown)
//! - Properties (status/type statistics, rent totals)
//! - Tenants (active/inactive partition)
//! - Comprehensive (system-wide dashboard plus all summaries)
//! - Utility bill group summaries (energy/water)
//!
//! The flow is always period resolution, data access, aggregation, section
//! building, in that order, driven by [`ReportService`].

pub mod aggregate;
pub mod error;
pub mod period;
pub mod sections;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use period::ReportPeriod;
pub use service::{ReportService, ReportStore};
pub use types::*;
