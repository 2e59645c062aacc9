//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod document;
pub mod energy_bill;
pub mod report;
pub mod water_bill;

pub use document::{
    CreateDocumentInput, DocumentError, DocumentFilter, DocumentRepository, UpdateDocumentInput,
};
pub use energy_bill::{
    CreateEnergyBillInput, EnergyBillError, EnergyBillFilter, EnergyBillRepository,
    UpdateEnergyBillInput,
};
pub use report::ReportRepository;
pub use water_bill::{
    CreateWaterBillInput, UpdateWaterBillInput, WaterBillError, WaterBillFilter,
    WaterBillRepository,
};
