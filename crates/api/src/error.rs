//! Error-to-response mapping for the HTTP surface.
//!
//! Every handler returns [`ApiResult`]; this module is the single place
//! where error kinds become HTTP status codes. The core never swallows an
//! error into a generic failure, and neither does this layer: client-side
//! problems (bad filters, unknown period tokens) map to 4xx, everything
//! else to 5xx.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use quadra_core::render::RenderError;
use quadra_core::reports::ReportError;
use quadra_db::repositories::{DocumentError, EnergyBillError, WaterBillError};
use quadra_shared::AppError;

/// Result type used by all handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper giving [`AppError`] an HTTP response shape.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        let app = match err {
            ReportError::InvalidPeriod(_) | ReportError::InvalidDateRange { .. } => {
                AppError::Validation(err.to_string())
            }
            ReportError::Adapter(message) => AppError::Database(message),
        };
        Self(app)
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        Self(AppError::Rendering(err.to_string()))
    }
}

impl From<EnergyBillError> for ApiError {
    fn from(err: EnergyBillError) -> Self {
        let app = match &err {
            EnergyBillError::NotFound(_) => AppError::NotFound(err.to_string()),
            EnergyBillError::PropertyNotFound(_) => AppError::Validation(err.to_string()),
            EnergyBillError::Database(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<WaterBillError> for ApiError {
    fn from(err: WaterBillError) -> Self {
        let app = match &err {
            WaterBillError::NotFound(_) => AppError::NotFound(err.to_string()),
            WaterBillError::PropertyNotFound(_) => AppError::Validation(err.to_string()),
            WaterBillError::Database(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        let app = match &err {
            DocumentError::NotFound(_) => AppError::NotFound(err.to_string()),
            DocumentError::PropertyNotFound(_) | DocumentError::TenantNotFound(_) => {
                AppError::Validation(err.to_string())
            }
            DocumentError::Database(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_period_maps_to_client_error() {
        let api: ApiError = ReportError::InvalidPeriod("bogus".to_string()).into();
        assert_eq!(api.0.status_code(), 400);
    }

    #[test]
    fn test_adapter_failure_maps_to_server_error() {
        let api: ApiError = ReportError::Adapter("connection refused".to_string()).into();
        assert_eq!(api.0.status_code(), 500);
    }
}
