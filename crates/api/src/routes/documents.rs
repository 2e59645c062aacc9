//! Document metadata routes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use quadra_db::entities::documents;
use quadra_db::repositories::{
    CreateDocumentInput, DocumentFilter, DocumentRepository, UpdateDocumentInput,
};
use quadra_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::error::ApiResult;
use crate::routes::MessageResponse;

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route(
            "/documents/{document_id}",
            get(get_document).put(update_document).delete(delete_document),
        )
}

// ============================================================================
// Query / Request Types
// ============================================================================

/// Query parameters for listing documents.
#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Filter by linked property.
    pub property_id: Option<Uuid>,
    /// Filter by linked tenant.
    pub tenant_id: Option<Uuid>,
    /// Filter by document type.
    pub doc_type: Option<String>,
}

/// Request body for creating a document.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
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

/// Request body for updating a document.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
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

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /documents
async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> ApiResult<Json<PageResponse<documents::Model>>> {
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(50),
    };
    let filter = DocumentFilter {
        property_id: query.property_id,
        tenant_id: query.tenant_id,
        document_type: query.doc_type,
    };

    let repository = DocumentRepository::new((*state.db).clone());
    let (items, total) = repository.list(&filter, &page).await?;
    Ok(Json(PageResponse::new(items, &page, total)))
}

/// GET /documents/{document_id}
async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> ApiResult<Json<documents::Model>> {
    let repository = DocumentRepository::new((*state.db).clone());
    let document = repository
        .find_by_id(document_id)
        .await?
        .ok_or_else(|| quadra_shared::AppError::NotFound(format!("Document {document_id}")))?;
    Ok(Json(document))
}

/// POST /documents
async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> ApiResult<Json<documents::Model>> {
    let repository = DocumentRepository::new((*state.db).clone());
    let document = repository
        .create(CreateDocumentInput {
            name: request.name,
            document_type: request.document_type,
            property_id: request.property_id,
            tenant_id: request.tenant_id,
            file_name: request.file_name,
            file_size: request.file_size,
            mime_type: request.mime_type,
            issue_date: request.issue_date,
            expiry_date: request.expiry_date,
            status: request.status,
        })
        .await?;

    info!(document_id = %document.id, "document created");
    Ok(Json(document))
}

/// PUT /documents/{document_id}
async fn update_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Json(request): Json<UpdateDocumentRequest>,
) -> ApiResult<Json<documents::Model>> {
    let repository = DocumentRepository::new((*state.db).clone());
    let document = repository
        .update(
            document_id,
            UpdateDocumentInput {
                name: request.name,
                document_type: request.document_type,
                issue_date: request.issue_date,
                expiry_date: request.expiry_date,
                status: request.status,
            },
        )
        .await?;

    info!(document_id = %document_id, "document updated");
    Ok(Json(document))
}

/// DELETE /documents/{document_id}
async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let repository = DocumentRepository::new((*state.db).clone());
    repository.delete(document_id).await?;

    info!(document_id = %document_id, "document deleted");
    Ok(Json(MessageResponse {
        message: "Document deleted successfully".to_string(),
        status: "success",
    }))
}
