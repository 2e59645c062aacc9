//! Water bill routes: CRUD plus billing-group summaries.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use quadra_core::reports::{BillKind, ReportService, UtilityBillRecord};
use quadra_db::ReportRepository;
use quadra_db::entities::water_bills;
use quadra_db::repositories::{
    CreateWaterBillInput, UpdateWaterBillInput, WaterBillFilter, WaterBillRepository,
};
use quadra_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::error::ApiResult;
use crate::routes::MessageResponse;

/// Creates the water bill routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/water-bills", get(list_water_bills).post(create_water_bill))
        .route(
            "/water-bills/{bill_id}",
            get(get_water_bill)
                .put(update_water_bill)
                .delete(delete_water_bill),
        )
        .route("/water-bills/group/{group_id}/summary", get(group_summary))
}

// ============================================================================
// Query / Request / Response Types
// ============================================================================

/// Query parameters for listing water bills.
#[derive(Debug, Deserialize)]
pub struct WaterBillListQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Filter by property.
    pub property_id: Option<Uuid>,
    /// Filter by billing group.
    pub group_id: Option<String>,
    /// Filter by year.
    pub year: Option<i32>,
    /// Filter by month.
    pub month: Option<i32>,
}

/// Request body for creating a water bill.
#[derive(Debug, Deserialize)]
pub struct CreateWaterBillRequest {
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
    /// Total consumption in liters.
    pub total_liters: Decimal,
}

/// Request body for updating a water bill.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWaterBillRequest {
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
    pub total_liters: Option<Decimal>,
}

/// Query parameters for the group summary.
#[derive(Debug, Deserialize)]
pub struct GroupSummaryQuery {
    /// Restrict to one billing year.
    pub year: Option<i32>,
}

/// Response for the billing-group summary.
#[derive(Debug, Serialize)]
pub struct WaterGroupSummaryResponse {
    /// The billing group.
    pub group_id: String,
    /// Number of bills in the group.
    pub total_bills: u64,
    /// Sum of billed amounts.
    pub total_amount: Decimal,
    /// Sum of consumption.
    pub total_liters: Decimal,
    /// Mean billed amount (zero for an empty group).
    pub average_amount: Decimal,
    /// Mean consumption (zero for an empty group).
    pub average_liters: Decimal,
    /// The underlying bills.
    pub bills: Vec<UtilityBillRecord>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /water-bills
async fn list_water_bills(
    State(state): State<AppState>,
    Query(query): Query<WaterBillListQuery>,
) -> ApiResult<Json<PageResponse<water_bills::Model>>> {
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(50),
    };
    let filter = WaterBillFilter {
        property_id: query.property_id,
        group_id: query.group_id,
        year: query.year,
        month: query.month,
    };

    let repository = WaterBillRepository::new((*state.db).clone());
    let (bills, total) = repository.list(&filter, &page).await?;
    Ok(Json(PageResponse::new(bills, &page, total)))
}

/// GET /water-bills/{bill_id}
async fn get_water_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<Uuid>,
) -> ApiResult<Json<water_bills::Model>> {
    let repository = WaterBillRepository::new((*state.db).clone());
    let bill = repository
        .find_by_id(bill_id)
        .await?
        .ok_or_else(|| quadra_shared::AppError::NotFound(format!("Water bill {bill_id}")))?;
    Ok(Json(bill))
}

/// POST /water-bills
async fn create_water_bill(
    State(state): State<AppState>,
    Json(request): Json<CreateWaterBillRequest>,
) -> ApiResult<Json<water_bills::Model>> {
    let repository = WaterBillRepository::new((*state.db).clone());
    let bill = repository
        .create(CreateWaterBillInput {
            property_id: request.property_id,
            group_id: request.group_id,
            year: request.year,
            month: request.month,
            reading_date: request.reading_date,
            total_amount: request.total_amount,
            total_liters: request.total_liters,
        })
        .await?;

    info!(bill_id = %bill.id, "water bill created");
    Ok(Json(bill))
}

/// PUT /water-bills/{bill_id}
async fn update_water_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<Uuid>,
    Json(request): Json<UpdateWaterBillRequest>,
) -> ApiResult<Json<water_bills::Model>> {
    let repository = WaterBillRepository::new((*state.db).clone());
    let bill = repository
        .update(
            bill_id,
            UpdateWaterBillInput {
                group_id: request.group_id,
                year: request.year,
                month: request.month,
                reading_date: request.reading_date,
                total_amount: request.total_amount,
                total_liters: request.total_liters,
            },
        )
        .await?;

    info!(bill_id = %bill_id, "water bill updated");
    Ok(Json(bill))
}

/// DELETE /water-bills/{bill_id}
async fn delete_water_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let repository = WaterBillRepository::new((*state.db).clone());
    repository.delete(bill_id).await?;

    info!(bill_id = %bill_id, "water bill deleted");
    Ok(Json(MessageResponse {
        message: "Water bill deleted successfully".to_string(),
        status: "success",
    }))
}

/// GET /water-bills/group/{group_id}/summary
async fn group_summary(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(query): Query<GroupSummaryQuery>,
) -> ApiResult<Json<WaterGroupSummaryResponse>> {
    let service = ReportService::new(ReportRepository::new((*state.db).clone()));
    let (summary, bills) = service
        .bill_group_summary(BillKind::Water, &group_id, query.year)
        .await?;

    Ok(Json(WaterGroupSummaryResponse {
        group_id: summary.group_id,
        total_bills: summary.count,
        total_amount: summary.total_amount,
        total_liters: summary.total_quantity,
        average_amount: summary.average_amount,
        average_liters: summary.average_quantity,
        bills,
    }))
}
