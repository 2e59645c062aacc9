//! API route definitions.

use axum::Router;
use serde::Serialize;

use crate::AppState;

pub mod documents;
pub mod energy_bills;
pub mod health;
pub mod reports;
pub mod water_bills;

/// Generic acknowledgement response for mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
    /// Outcome tag.
    pub status: &'static str,
}

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
        .merge(energy_bills::routes())
        .merge(water_bills::routes())
        .merge(documents::routes())
}
