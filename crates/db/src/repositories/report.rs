//! Report repository: the data access adapter behind the report engine.
//!
//! Implements [`ReportStore`] with filtered range scans over the persisted
//! collections, returning record sets in the sort orders the report engine
//! relies on. Queries are read-only.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};

use quadra_core::reports::{
    AlertRecord, BillKind, PropertyRecord, ReportError, ReportFilter, ReportStore, TenantRecord,
    TransactionKind, TransactionRecord, UtilityBillRecord,
};

use crate::entities::{alerts, energy_bills, properties, tenants, transactions, water_bills};

/// Read-only repository backing report generation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn transaction_query(filter: &ReportFilter) -> Select<transactions::Entity> {
        let mut query = transactions::Entity::find();
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::Column::Date.lte(end));
        }
        if let Some(property_id) = filter.property_id {
            query = query.filter(transactions::Column::PropertyId.eq(property_id));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(transactions::Column::TenantId.eq(tenant_id));
        }
        query.order_by_desc(transactions::Column::Date)
    }

    fn property_query(filter: &ReportFilter) -> Select<properties::Entity> {
        let mut query = properties::Entity::find();
        if let Some(status) = &filter.status {
            query = query.filter(properties::Column::Status.eq(status));
        }
        if let Some(property_type) = &filter.entity_type {
            query = query.filter(properties::Column::PropertyType.eq(property_type));
        }
        query.order_by_desc(properties::Column::CreatedAt)
    }

    fn tenant_query(filter: &ReportFilter) -> Select<tenants::Entity> {
        let mut query = tenants::Entity::find();
        if let Some(property_id) = filter.property_id {
            query = query.filter(tenants::Column::PropertyId.eq(property_id));
        }
        if let Some(status) = &filter.status {
            query = query.filter(tenants::Column::Status.eq(status));
        }
        query.order_by_desc(tenants::Column::CreatedAt)
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn find_transactions(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<TransactionRecord>, ReportError> {
        let rows = Self::transaction_query(filter)
            .all(&self.db)
            .await
            .map_err(adapter_error)?;
        rows.into_iter().map(map_transaction).collect()
    }

    async fn find_properties(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<PropertyRecord>, ReportError> {
        let rows = Self::property_query(filter)
            .all(&self.db)
            .await
            .map_err(adapter_error)?;
        Ok(rows.into_iter().map(map_property).collect())
    }

    async fn find_tenants(&self, filter: &ReportFilter) -> Result<Vec<TenantRecord>, ReportError> {
        let rows = Self::tenant_query(filter)
            .all(&self.db)
            .await
            .map_err(adapter_error)?;
        Ok(rows.into_iter().map(map_tenant).collect())
    }

    async fn find_unresolved_alerts(&self) -> Result<Vec<AlertRecord>, ReportError> {
        let rows = alerts::Entity::find()
            .filter(alerts::Column::Resolved.eq(false))
            .order_by_asc(alerts::Column::Priority)
            .order_by_desc(alerts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(adapter_error)?;
        Ok(rows.into_iter().map(map_alert).collect())
    }

    async fn find_bills(
        &self,
        kind: BillKind,
        filter: &ReportFilter,
    ) -> Result<Vec<UtilityBillRecord>, ReportError> {
        match kind {
            BillKind::Energy => {
                let mut query = energy_bills::Entity::find();
                if let Some(group_id) = &filter.group_id {
                    query = query.filter(energy_bills::Column::GroupId.eq(group_id));
                }
                if let Some(year) = filter.year {
                    query = query.filter(energy_bills::Column::Year.eq(year));
                }
                if let Some(month) = filter.month {
                    query = query.filter(energy_bills::Column::Month.eq(i32::try_from(month).unwrap_or(0)));
                }
                if let Some(property_id) = filter.property_id {
                    query = query.filter(energy_bills::Column::PropertyId.eq(property_id));
                }
                let rows = query
                    .order_by_desc(energy_bills::Column::ReadingDate)
                    .all(&self.db)
                    .await
                    .map_err(adapter_error)?;
                Ok(rows.into_iter().map(map_energy_bill).collect())
            }
            BillKind::Water => {
                let mut query = water_bills::Entity::find();
                if let Some(group_id) = &filter.group_id {
                    query = query.filter(water_bills::Column::GroupId.eq(group_id));
                }
                if let Some(year) = filter.year {
                    query = query.filter(water_bills::Column::Year.eq(year));
                }
                if let Some(month) = filter.month {
                    query = query.filter(water_bills::Column::Month.eq(i32::try_from(month).unwrap_or(0)));
                }
                if let Some(property_id) = filter.property_id {
                    query = query.filter(water_bills::Column::PropertyId.eq(property_id));
                }
                let rows = query
                    .order_by_desc(water_bills::Column::ReadingDate)
                    .all(&self.db)
                    .await
                    .map_err(adapter_error)?;
                Ok(rows.into_iter().map(map_water_bill).collect())
            }
        }
    }

    async fn count_properties(&self, filter: &ReportFilter) -> Result<u64, ReportError> {
        Self::property_query(filter)
            .count(&self.db)
            .await
            .map_err(adapter_error)
    }

    async fn count_tenants(&self, filter: &ReportFilter) -> Result<u64, ReportError> {
        Self::tenant_query(filter)
            .count(&self.db)
            .await
            .map_err(adapter_error)
    }

    async fn count_unresolved_alerts(&self) -> Result<u64, ReportError> {
        alerts::Entity::find()
            .filter(alerts::Column::Resolved.eq(false))
            .count(&self.db)
            .await
            .map_err(adapter_error)
    }
}

fn adapter_error(err: DbErr) -> ReportError {
    ReportError::Adapter(err.to_string())
}

/// Maps a transaction row into the report engine's record shape.
///
/// The schema constrains `transaction_type`, so an unparsable value means
/// the store itself is inconsistent and surfaces as an adapter error.
fn map_transaction(model: transactions::Model) -> Result<TransactionRecord, ReportError> {
    let kind = model
        .transaction_type
        .parse::<TransactionKind>()
        .map_err(ReportError::Adapter)?;

    Ok(TransactionRecord {
        id: model.id,
        property_id: model.property_id,
        tenant_id: model.tenant_id,
        kind,
        amount: model.amount,
        category: model.category,
        description: model.description,
        date: model.date.with_timezone(&Utc),
    })
}

fn map_property(model: properties::Model) -> PropertyRecord {
    PropertyRecord {
        id: model.id,
        address: model.address,
        kind: model.property_type,
        status: model.status,
        rent: model.rent,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn map_tenant(model: tenants::Model) -> TenantRecord {
    TenantRecord {
        id: model.id,
        property_id: model.property_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn map_alert(model: alerts::Model) -> AlertRecord {
    AlertRecord {
        id: model.id,
        property_id: model.property_id,
        tenant_id: model.tenant_id,
        message: model.message,
        priority: model.priority,
        resolved: model.resolved,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn map_energy_bill(model: energy_bills::Model) -> UtilityBillRecord {
    UtilityBillRecord {
        id: model.id,
        property_id: model.property_id,
        group_id: model.group_id,
        year: model.year,
        month: model.month.unsigned_abs(),
        total_amount: model.total_amount,
        total_quantity: model.total_kwh,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn map_water_bill(model: water_bills::Model) -> UtilityBillRecord {
    UtilityBillRecord {
        id: model.id,
        property_id: model.property_id,
        group_id: model.group_id,
        year: model.year,
        month: model.month.unsigned_abs(),
        total_amount: model.total_amount,
        total_quantity: model.total_liters,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
