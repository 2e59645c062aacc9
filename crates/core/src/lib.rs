//! Core business logic for Quadra.
//!
//! This crate contains the report aggregation and document-assembly engine:
//! - `reports` - filters, aggregation, period resolution, section building,
//!   and the report orchestrator
//! - `render` - the document renderer consuming assembled reports
//!
//! It has zero web or database dependencies; persistence is reached through
//! the [`reports::ReportStore`] trait implemented by the db crate.

pub mod render;
pub mod reports;
