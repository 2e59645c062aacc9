//! Initial schema: properties, tenants, transactions, utility bills,
//! alerts, and documents.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS documents, alerts, water_bills, energy_bills, \
             transactions, tenants, properties CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Properties under management
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    address TEXT NOT NULL,
    property_type VARCHAR(50),
    status VARCHAR(20),
    rent NUMERIC(12, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_properties_created ON properties(created_at DESC);
CREATE INDEX idx_properties_status ON properties(status);

-- Tenants, optionally linked to a property
CREATE TABLE tenants (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID REFERENCES properties(id) ON DELETE SET NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone VARCHAR(30),
    status VARCHAR(20),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_tenants_created ON tenants(created_at DESC);
CREATE INDEX idx_tenants_property ON tenants(property_id);

-- Financial transactions
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID REFERENCES properties(id) ON DELETE SET NULL,
    tenant_id UUID REFERENCES tenants(id) ON DELETE SET NULL,
    transaction_type VARCHAR(10) NOT NULL
        CONSTRAINT chk_transaction_type CHECK (transaction_type IN ('income', 'expense')),
    amount NUMERIC(12, 2) NOT NULL CONSTRAINT chk_amount_positive CHECK (amount >= 0),
    category VARCHAR(100),
    description TEXT NOT NULL DEFAULT '',
    date TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_transactions_date ON transactions(date DESC);
CREATE INDEX idx_transactions_property ON transactions(property_id, date DESC);
CREATE INDEX idx_transactions_tenant ON transactions(tenant_id, date DESC);

-- Energy bills, grouped for shared-meter aggregation
CREATE TABLE energy_bills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    group_id VARCHAR(100) NOT NULL,
    year INT NOT NULL CONSTRAINT chk_energy_year CHECK (year BETWEEN 2000 AND 3000),
    month INT NOT NULL CONSTRAINT chk_energy_month CHECK (month BETWEEN 1 AND 12),
    reading_date DATE NOT NULL,
    total_amount NUMERIC(12, 2) NOT NULL,
    total_kwh NUMERIC(12, 3) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_energy_bills_reading ON energy_bills(reading_date DESC);
CREATE INDEX idx_energy_bills_group ON energy_bills(group_id, year);

-- Water bills, same shape with liters
CREATE TABLE water_bills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    group_id VARCHAR(100) NOT NULL,
    year INT NOT NULL CONSTRAINT chk_water_year CHECK (year BETWEEN 2000 AND 3000),
    month INT NOT NULL CONSTRAINT chk_water_month CHECK (month BETWEEN 1 AND 12),
    reading_date DATE NOT NULL,
    total_amount NUMERIC(12, 2) NOT NULL,
    total_liters NUMERIC(14, 3) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_water_bills_reading ON water_bills(reading_date DESC);
CREATE INDEX idx_water_bills_group ON water_bills(group_id, year);

-- Operational alerts
CREATE TABLE alerts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID REFERENCES properties(id) ON DELETE CASCADE,
    tenant_id UUID REFERENCES tenants(id) ON DELETE CASCADE,
    message TEXT NOT NULL,
    priority VARCHAR(20),
    resolved BOOLEAN NOT NULL DEFAULT FALSE,
    resolved_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Unresolved alerts are listed by priority, then newest first
CREATE INDEX idx_alerts_open ON alerts(priority ASC, created_at DESC) WHERE NOT resolved;

-- Document metadata (file storage lives elsewhere)
CREATE TABLE documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    document_type VARCHAR(50),
    property_id UUID REFERENCES properties(id) ON DELETE SET NULL,
    tenant_id UUID REFERENCES tenants(id) ON DELETE SET NULL,
    file_name TEXT,
    file_size BIGINT,
    mime_type VARCHAR(100),
    issue_date DATE,
    expiry_date DATE,
    status VARCHAR(20),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_documents_created ON documents(created_at DESC);
CREATE INDEX idx_documents_property ON documents(property_id);
CREATE INDEX idx_documents_tenant ON documents(tenant_id);
";
