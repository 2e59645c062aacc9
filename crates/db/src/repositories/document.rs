//! Document metadata repository.
//!
//! File contents live in external storage; this table only tracks metadata
//! and links to properties and tenants.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use quadra_shared::types::PageRequest;

use crate::entities::{documents, properties, tenants};

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Referenced property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    /// Referenced tenant not found.
    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a document.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// Document display name.
    pub name: String,
    /// Document type (contract, invoice, ...).
    pub document_type: Option<String>,
    /// Linked property.
    pub property_id: Option<Uuid>,
    /// Linked tenant.
    pub tenant_id: Option<Uuid>,
    /// Stored file name.
    pub file_name: Option<String>,
    /// Stored file size in bytes.
    pub file_size: Option<i64>,
    /// MIME type of the stored file.
    pub mime_type: Option<String>,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// Document status.
    pub status: Option<String>,
}

/// Input for updating a document; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateDocumentInput {
    /// New display name.
    pub name: Option<String>,
    /// New document type.
    pub document_type: Option<String>,
    /// New issue date.
    pub issue_date: Option<NaiveDate>,
    /// New expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// New status.
    pub status: Option<String>,
}

/// Filter options for listing documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Filter by linked property.
    pub property_id: Option<Uuid>,
    /// Filter by linked tenant.
    pub tenant_id: Option<Uuid>,
    /// Filter by document type.
    pub document_type: Option<String>,
}

/// Repository for document database operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &DocumentFilter) -> Select<documents::Entity> {
        let mut query = documents::Entity::find();
        if let Some(property_id) = filter.property_id {
            query = query.filter(documents::Column::PropertyId.eq(property_id));
        }
        if let Some(tenant_id) = filter.tenant_id {
            query = query.filter(documents::Column::TenantId.eq(tenant_id));
        }
        if let Some(document_type) = &filter.document_type {
            query = query.filter(documents::Column::DocumentType.eq(document_type));
        }
        query
    }

    /// Lists documents matching the filter, newest first, paginated.
    ///
    /// Returns the page of documents plus the total match count.
    pub async fn list(
        &self,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> Result<(Vec<documents::Model>, u64), DocumentError> {
        let query = Self::filtered(filter);
        let total = query.clone().count(&self.db).await?;
        let items = query
            .order_by_desc(documents::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok((items, total))
    }

    /// Fetches a single document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<documents::Model>, DocumentError> {
        Ok(documents::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates a document after checking the referenced property and tenant
    /// exist.
    pub async fn create(
        &self,
        input: CreateDocumentInput,
    ) -> Result<documents::Model, DocumentError> {
        if let Some(property_id) = input.property_id {
            let property = properties::Entity::find_by_id(property_id)
                .one(&self.db)
                .await?;
            if property.is_none() {
                return Err(DocumentError::PropertyNotFound(property_id));
            }
        }
        if let Some(tenant_id) = input.tenant_id {
            let tenant = tenants::Entity::find_by_id(tenant_id).one(&self.db).await?;
            if tenant.is_none() {
                return Err(DocumentError::TenantNotFound(tenant_id));
            }
        }

        let now = Utc::now();
        let document = documents::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            document_type: Set(input.document_type),
            property_id: Set(input.property_id),
            tenant_id: Set(input.tenant_id),
            file_name: Set(input.file_name),
            file_size: Set(input.file_size),
            mime_type: Set(input.mime_type),
            issue_date: Set(input.issue_date),
            expiry_date: Set(input.expiry_date),
            status: Set(input.status),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(document.insert(&self.db).await?)
    }

    /// Applies a partial update to an existing document.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateDocumentInput,
    ) -> Result<documents::Model, DocumentError> {
        let existing = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DocumentError::NotFound(id))?;

        let mut document: documents::ActiveModel = existing.into();
        if let Some(name) = input.name {
            document.name = Set(name);
        }
        if let Some(document_type) = input.document_type {
            document.document_type = Set(Some(document_type));
        }
        if let Some(issue_date) = input.issue_date {
            document.issue_date = Set(Some(issue_date));
        }
        if let Some(expiry_date) = input.expiry_date {
            document.expiry_date = Set(Some(expiry_date));
        }
        if let Some(status) = input.status {
            document.status = Set(Some(status));
        }
        document.updated_at = Set(Utc::now().into());

        Ok(document.update(&self.db).await?)
    }

    /// Deletes a document.
    pub async fn delete(&self, id: Uuid) -> Result<(), DocumentError> {
        let result = documents::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DocumentError::NotFound(id));
        }
        Ok(())
    }
}
