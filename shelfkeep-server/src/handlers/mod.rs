//! Request handlers

mod books;
mod loans;
mod members;
mod stats;
mod sync;

pub use books::*;
pub use loans::*;
pub use members::*;
pub use stats::*;
pub use sync::*;

use axum::Json;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
