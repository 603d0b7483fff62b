//! Statistics and explicit saves

use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use shelfkeep_core::CatalogStats;

/// Live circulation statistics
pub async fn stats(State(state): State<AppState>) -> Json<CatalogStats> {
    let catalog = state.catalog.read().await;
    Json(catalog.stats())
}

/// Persist the catalog now
pub async fn save(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.save_catalog().await?;
    Ok(StatusCode::NO_CONTENT)
}
