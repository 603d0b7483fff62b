//! Borrowing and returning

use super::books::BookResponse;
use crate::error::ApiError;
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shelfkeep_core::ReturnReceipt;

/// List every book currently on loan
pub async fn list_loans(State(state): State<AppState>) -> Json<Vec<BookResponse>> {
    let catalog = state.catalog.read().await;
    Json(
        catalog
            .loaned_books()
            .into_iter()
            .map(BookResponse::from)
            .collect(),
    )
}

/// Request body for borrowing
#[derive(Debug, Deserialize)]
pub struct BorrowRequest {
    pub isbn: String,
    pub member_id: String,
}

/// Lend a book to a member
pub async fn borrow_book(
    State(state): State<AppState>,
    Json(body): Json<BorrowRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let response = state
        .mutate(|catalog| {
            catalog
                .borrow_book(&body.isbn, &body.member_id)
                .map(BookResponse::from)
        })
        .await?;

    if let Some(due_date) = response.due_date {
        state.broadcast(ServerEvent::BookBorrowed {
            isbn: body.isbn,
            member_id: body.member_id,
            due_date,
        });
    }
    Ok((StatusCode::CREATED, Json(response)))
}

/// Optional cross-check of who is returning the book
#[derive(Debug, Deserialize)]
pub struct ReturnQuery {
    pub member_id: Option<String>,
}

/// Take a book back from whoever holds it
pub async fn return_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Query(query): Query<ReturnQuery>,
) -> Result<Json<ReturnReceipt>, ApiError> {
    let receipt = state
        .mutate(|catalog| catalog.return_book(&isbn, query.member_id.as_deref()))
        .await?;

    state.broadcast(ServerEvent::BookReturned {
        isbn: receipt.isbn.clone(),
        member_id: receipt.borrower_id.clone(),
    });
    Ok(Json(receipt))
}
