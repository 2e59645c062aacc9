//! Report routes.
//!
//! One endpoint per report kind, each streaming the rendered PDF back as an
//! attachment, plus filter discovery and the (not yet implemented) history
//! listing.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quadra_core::render::{DeliveryFormat, DocumentRenderer, RenderedDocument};
use quadra_core::reports::{ReportFilter, ReportPeriod, ReportService, ReportStore};
use quadra_db::ReportRepository;

use crate::error::ApiResult;
use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/financial", get(financial_report))
        .route("/reports/properties", get(properties_report))
        .route("/reports/tenants", get(tenants_report))
        .route("/reports/comprehensive", get(comprehensive_report))
        .route("/reports/quick-financial", get(quick_financial_report))
        .route("/reports/available-filters", get(available_filters))
        .route("/reports/history", get(reports_history))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the financial report.
#[derive(Debug, Deserialize)]
pub struct FinancialReportQuery {
    /// Range start (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Range end (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
    /// Restrict to one property.
    pub property_id: Option<Uuid>,
    /// Restrict to one tenant.
    pub tenant_id: Option<Uuid>,
}

/// Query parameters for the properties report.
#[derive(Debug, Deserialize)]
pub struct PropertiesReportQuery {
    /// Filter by property status.
    pub status: Option<String>,
    /// Filter by property type.
    pub property_type: Option<String>,
}

/// Query parameters for the tenants report.
#[derive(Debug, Deserialize)]
pub struct TenantsReportQuery {
    /// Restrict to one property.
    pub property_id: Option<Uuid>,
    /// Filter by tenant status.
    pub status: Option<String>,
}

/// Query parameters for the comprehensive report.
#[derive(Debug, Deserialize)]
pub struct ComprehensiveReportQuery {
    /// Range start for the financial block (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Range end for the financial block (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for the quick financial report.
#[derive(Debug, Deserialize)]
pub struct QuickFinancialQuery {
    /// Period token; defaults to `current_month`.
    pub period: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Property option in the filter-discovery response.
#[derive(Debug, Serialize)]
pub struct PropertyFilterOption {
    /// Property ID.
    pub id: Uuid,
    /// Street address.
    pub address: String,
    /// Property type.
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    /// Property status.
    pub status: Option<String>,
}

/// Tenant option in the filter-discovery response.
#[derive(Debug, Serialize)]
pub struct TenantFilterOption {
    /// Tenant ID.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Tenant status.
    pub status: Option<String>,
}

/// One recognized quick period.
#[derive(Debug, Serialize)]
pub struct PeriodOption {
    /// Wire token.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Response for the filter-discovery endpoint.
#[derive(Debug, Serialize)]
pub struct AvailableFiltersResponse {
    /// Known properties.
    pub properties: Vec<PropertyFilterOption>,
    /// Known tenants.
    pub tenants: Vec<TenantFilterOption>,
    /// Valid property statuses.
    pub property_status: Vec<&'static str>,
    /// Valid tenant statuses.
    pub tenant_status: Vec<&'static str>,
    /// Distinct property types currently in use.
    pub property_types: Vec<String>,
    /// Recognized period tokens.
    pub quick_periods: Vec<PeriodOption>,
}

/// Response for the report history stub.
#[derive(Debug, Serialize)]
pub struct ReportsHistoryResponse {
    /// Explanatory message.
    pub message: &'static str,
    /// Past reports (always empty for now).
    pub reports: Vec<serde_json::Value>,
    /// Total count.
    pub total: u64,
    /// Implementation note.
    pub note: &'static str,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /reports/financial
async fn financial_report(
    State(state): State<AppState>,
    Query(query): Query<FinancialReportQuery>,
) -> ApiResult<Response> {
    let filter = ReportFilter {
        start_date: query.start_date.map(at_midnight),
        end_date: query.end_date.map(at_midnight),
        property_id: query.property_id,
        tenant_id: query.tenant_id,
        ..ReportFilter::default()
    };

    let document = report_service(&state)
        .financial_report(&filter, Utc::now())
        .await?;
    let rendered = state.renderer.render(&document, DeliveryFormat::Pdf)?;
    Ok(attachment(rendered))
}

/// GET /reports/properties
async fn properties_report(
    State(state): State<AppState>,
    Query(query): Query<PropertiesReportQuery>,
) -> ApiResult<Response> {
    let filter = ReportFilter {
        status: query.status,
        entity_type: query.property_type,
        ..ReportFilter::default()
    };

    let document = report_service(&state)
        .properties_report(&filter, Utc::now())
        .await?;
    let rendered = state.renderer.render(&document, DeliveryFormat::Pdf)?;
    Ok(attachment(rendered))
}

/// GET /reports/tenants
async fn tenants_report(
    State(state): State<AppState>,
    Query(query): Query<TenantsReportQuery>,
) -> ApiResult<Response> {
    let filter = ReportFilter {
        property_id: query.property_id,
        status: query.status,
        ..ReportFilter::default()
    };

    let document = report_service(&state)
        .tenants_report(&filter, Utc::now())
        .await?;
    let rendered = state.renderer.render(&document, DeliveryFormat::Pdf)?;
    Ok(attachment(rendered))
}

/// GET /reports/comprehensive
async fn comprehensive_report(
    State(state): State<AppState>,
    Query(query): Query<ComprehensiveReportQuery>,
) -> ApiResult<Response> {
    let filter = ReportFilter {
        start_date: query.start_date.map(at_midnight),
        end_date: query.end_date.map(at_midnight),
        ..ReportFilter::default()
    };

    let document = report_service(&state)
        .comprehensive_report(&filter, Utc::now())
        .await?;
    let rendered = state.renderer.render(&document, DeliveryFormat::Pdf)?;
    Ok(attachment(rendered))
}

/// GET /reports/quick-financial
///
/// The period token takes precedence over any raw date range; an unknown
/// token is a client error, never a silent default.
async fn quick_financial_report(
    State(state): State<AppState>,
    Query(query): Query<QuickFinancialQuery>,
) -> ApiResult<Response> {
    let token = query.period.as_deref().unwrap_or("current_month");
    let period = token.parse::<ReportPeriod>()?;

    let document = report_service(&state)
        .quick_financial_report(period, Utc::now())
        .await?;
    let rendered = state.renderer.render(&document, DeliveryFormat::Pdf)?;
    Ok(attachment(rendered))
}

/// GET /reports/available-filters
async fn available_filters(
    State(state): State<AppState>,
) -> ApiResult<Json<AvailableFiltersResponse>> {
    let repository = ReportRepository::new((*state.db).clone());
    let properties = repository.find_properties(&ReportFilter::default()).await?;
    let tenants = repository.find_tenants(&ReportFilter::default()).await?;

    let mut property_types: Vec<String> = Vec::new();
    for property in &properties {
        if let Some(property_type) = &property.kind {
            if !property_types.contains(property_type) {
                property_types.push(property_type.clone());
            }
        }
    }

    Ok(Json(AvailableFiltersResponse {
        properties: properties
            .into_iter()
            .map(|property| PropertyFilterOption {
                id: property.id,
                address: property.address,
                property_type: property.kind,
                status: property.status,
            })
            .collect(),
        tenants: tenants
            .into_iter()
            .map(|tenant| TenantFilterOption {
                id: tenant.id,
                name: tenant.name,
                email: tenant.email,
                status: tenant.status,
            })
            .collect(),
        property_status: vec!["available", "occupied", "maintenance", "unavailable"],
        tenant_status: vec!["active", "inactive"],
        property_types,
        quick_periods: ReportPeriod::ALL
            .into_iter()
            .map(|period| PeriodOption {
                key: period.token(),
                label: period.label(),
            })
            .collect(),
    }))
}

/// GET /reports/history
///
/// Report generation is not persisted yet; this always returns an empty
/// list with an explanatory note.
async fn reports_history() -> Json<ReportsHistoryResponse> {
    Json(ReportsHistoryResponse {
        message: "Histórico de relatórios - funcionalidade será implementada",
        reports: Vec::new(),
        total: 0,
        note: "Para implementar: criar a tabela reports_history e registrar cada geração",
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn report_service(state: &AppState) -> ReportService<ReportRepository> {
    ReportService::new(ReportRepository::new((*state.db).clone()))
}

/// Midnight UTC at the given date, mirroring how date-only filters are
/// interpreted everywhere else.
fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Wraps rendered bytes as a downloadable attachment.
fn attachment(rendered: RenderedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", rendered.filename),
            ),
        ],
        rendered.bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2026, 3, 14)]
    #[case(2024, 2, 29)]
    fn test_at_midnight(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let timestamp = at_midnight(date);
        assert_eq!(
            (timestamp.year(), timestamp.month(), timestamp.day()),
            (year, month, day)
        );
        assert_eq!((timestamp.hour(), timestamp.minute()), (0, 0));
    }

    #[test]
    fn test_attachment_headers() {
        let response = attachment(RenderedDocument {
            bytes: b"%PDF-1.3".to_vec(),
            filename: "financial_20260314_150926.pdf".to_string(),
            content_type: "application/pdf",
        });

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE.as_str()], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION.as_str()],
            "attachment; filename=financial_20260314_150926.pdf"
        );
    }
}
