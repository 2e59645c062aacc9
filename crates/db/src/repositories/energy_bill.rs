//! Energy bill repository for CRUD and group scans.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use quadra_shared::types::PageRequest;

use crate::entities::{energy_bills, properties};

/// Error types for energy bill operations.
#[derive(Debug, thiserror::Error)]
pub enum EnergyBillError {
    /// Energy bill not found.
    #[error("Energy bill not found: {0}")]
    NotFound(Uuid),

    /// Referenced property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an energy bill.
#[derive(Debug, Clone)]
pub struct CreateEnergyBillInput {
    /// Property the bill belongs to.
    pub property_id: Uuid,
    /// Billing group.
    pub group_id: String,
    /// Billing year.
    pub year: i32,
    /// Billing month (1-12).
    pub month: i32,
    /// Meter reading date.
    pub reading_date: NaiveDate,
    /// Total billed amount.
    pub total_amount: Decimal,
    /// Total consumption in kWh.
    pub total_kwh: Decimal,
}

/// Input for updating an energy bill; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEnergyBillInput {
    /// New billing group.
    pub group_id: Option<String>,
    /// New billing year.
    pub year: Option<i32>,
    /// New billing month.
    pub month: Option<i32>,
    /// New reading date.
    pub reading_date: Option<NaiveDate>,
    /// New total amount.
    pub total_amount: Option<Decimal>,
    /// New total consumption.
    pub total_kwh: Option<Decimal>,
}

/// Filter options for listing energy bills.
#[derive(Debug, Clone, Default)]
pub struct EnergyBillFilter {
    /// Filter by property.
    pub property_id: Option<Uuid>,
    /// Filter by billing group.
    pub group_id: Option<String>,
    /// Filter by year.
    pub year: Option<i32>,
    /// Filter by month.
    pub month: Option<i32>,
}

/// Repository for energy bill database operations.
#[derive(Debug, Clone)]
pub struct EnergyBillRepository {
    db: DatabaseConnection,
}

impl EnergyBillRepository {
    /// Creates a new energy bill repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &EnergyBillFilter) -> Select<energy_bills::Entity> {
        let mut query = energy_bills::Entity::find();
        if let Some(property_id) = filter.property_id {
            query = query.filter(energy_bills::Column::PropertyId.eq(property_id));
        }
        if let Some(group_id) = &filter.group_id {
            query = query.filter(energy_bills::Column::GroupId.eq(group_id));
        }
        if let Some(year) = filter.year {
            query = query.filter(energy_bills::Column::Year.eq(year));
        }
        if let Some(month) = filter.month {
            query = query.filter(energy_bills::Column::Month.eq(month));
        }
        query
    }

    /// Lists bills matching the filter, newest reading first, paginated.
    ///
    /// Returns the page of bills plus the total match count.
    pub async fn list(
        &self,
        filter: &EnergyBillFilter,
        page: &PageRequest,
    ) -> Result<(Vec<energy_bills::Model>, u64), EnergyBillError> {
        let query = Self::filtered(filter);
        let total = query.clone().count(&self.db).await?;
        let bills = query
            .order_by_desc(energy_bills::Column::ReadingDate)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok((bills, total))
    }

    /// Fetches a single bill by ID.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<energy_bills::Model>, EnergyBillError> {
        Ok(energy_bills::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates a new bill after checking the referenced property exists.
    pub async fn create(
        &self,
        input: CreateEnergyBillInput,
    ) -> Result<energy_bills::Model, EnergyBillError> {
        let property = properties::Entity::find_by_id(input.property_id)
            .one(&self.db)
            .await?;
        if property.is_none() {
            return Err(EnergyBillError::PropertyNotFound(input.property_id));
        }

        let now = Utc::now();
        let bill = energy_bills::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(input.property_id),
            group_id: Set(input.group_id),
            year: Set(input.year),
            month: Set(input.month),
            reading_date: Set(input.reading_date),
            total_amount: Set(input.total_amount),
            total_kwh: Set(input.total_kwh),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(bill.insert(&self.db).await?)
    }

    /// Applies a partial update to an existing bill.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateEnergyBillInput,
    ) -> Result<energy_bills::Model, EnergyBillError> {
        let existing = energy_bills::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(EnergyBillError::NotFound(id))?;

        let mut bill: energy_bills::ActiveModel = existing.into();
        if let Some(group_id) = input.group_id {
            bill.group_id = Set(group_id);
        }
        if let Some(year) = input.year {
            bill.year = Set(year);
        }
        if let Some(month) = input.month {
            bill.month = Set(month);
        }
        if let Some(reading_date) = input.reading_date {
            bill.reading_date = Set(reading_date);
        }
        if let Some(total_amount) = input.total_amount {
            bill.total_amount = Set(total_amount);
        }
        if let Some(total_kwh) = input.total_kwh {
            bill.total_kwh = Set(total_kwh);
        }
        bill.updated_at = Set(Utc::now().into());

        Ok(bill.update(&self.db).await?)
    }

    /// Deletes a bill.
    pub async fn delete(&self, id: Uuid) -> Result<(), EnergyBillError> {
        let result = energy_bills::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(EnergyBillError::NotFound(id));
        }
        Ok(())
    }
}
