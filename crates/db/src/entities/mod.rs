//! `SeaORM` entity definitions.

pub mod alerts;
pub mod documents;
pub mod energy_bills;
pub mod properties;
pub mod tenants;
pub mod transactions;
pub mod water_bills;
