//! Mapping of domain and storage failures onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelfkeep_core::{CirculationError, StorageError};
use thiserror::Error;

/// Error returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Circulation(#[from] CirculationError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Circulation(e) => match e {
                CirculationError::BookNotFound(_) | CirculationError::MemberNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                CirculationError::NotAvailable(_)
                | CirculationError::NotOnLoan(_)
                | CirculationError::BorrowLimitExceeded { .. }
                | CirculationError::DuplicateIsbn(_)
                | CirculationError::DuplicateMemberId(_) => StatusCode::CONFLICT,
                CirculationError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
