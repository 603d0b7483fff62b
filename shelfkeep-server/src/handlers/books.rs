//! Book catalog handlers

use crate::error::ApiError;
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shelfkeep_core::{today, Book, CirculationError};

/// Query parameters for listing books
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// Page number (1-indexed, 0 treated as 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Title/author substring or exact ISBN
    pub search: Option<String>,

    /// Restrict to one loan state
    pub status: Option<BookStatus>,
}

/// Loan-state filter for book listings
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Available,
    OnLoan,
    Overdue,
}

impl BookStatus {
    fn admits(self, book: &Book, today: NaiveDate) -> bool {
        match self {
            BookStatus::Available => book.is_available(),
            BookStatus::OnLoan => !book.is_available(),
            BookStatus::Overdue => book.is_overdue_on(today),
        }
    }
}

pub(crate) fn default_page() -> u32 {
    1
}
pub(crate) fn default_per_page() -> u32 {
    20
}

/// Sanitize page number (treat 0 as 1 to prevent underflow)
pub(crate) fn sanitize_page(page: u32) -> u32 {
    page.max(1)
}

/// A book as seen by API clients
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub available: bool,
    pub borrower_id: Option<String>,
    pub borrowed_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub overdue: bool,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title().to_string(),
            author: book.author().to_string(),
            isbn: book.isbn().to_string(),
            available: book.is_available(),
            borrower_id: book.borrower_id().map(str::to_string),
            borrowed_date: book.borrowed_date(),
            due_date: book.due_date(),
            overdue: book.is_overdue(),
        }
    }
}

/// List response with pagination
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<BookResponse>,
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

/// List books in catalog order
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Json<ListBooksResponse> {
    let catalog = state.catalog.read().await;
    let today = today();

    let matching: Vec<&Book> = match query.search.as_deref() {
        Some(search) => catalog.search_books(search),
        None => catalog.list_books().iter().collect(),
    };
    let books: Vec<&Book> = matching
        .into_iter()
        .filter(|book| query.status.map_or(true, |s| s.admits(book, today)))
        .collect();

    let total = books.len() as u32;

    // Paginate (sanitize page to prevent underflow)
    let page = sanitize_page(query.page);
    let start = (page - 1).saturating_mul(query.per_page) as usize;
    let books = books
        .into_iter()
        .skip(start)
        .take(query.per_page as usize)
        .map(BookResponse::from)
        .collect();

    Json(ListBooksResponse {
        books,
        total,
        page,
        per_page: query.per_page,
    })
}

/// Get a single book
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let catalog = state.catalog.read().await;
    let book = catalog.find_book(&isbn).map(BookResponse::from);
    book.map(Json)
        .ok_or_else(|| CirculationError::BookNotFound(isbn).into())
}

/// Request body for adding a book
#[derive(Debug, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// Add a book to the catalog
pub async fn add_book(
    State(state): State<AppState>,
    Json(body): Json<NewBook>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let response = state
        .mutate(|catalog| {
            catalog
                .add_book(&body.title, &body.author, &body.isbn)
                .map(BookResponse::from)
        })
        .await?;

    state.broadcast(ServerEvent::BookAdded {
        isbn: response.isbn.clone(),
        title: response.title.clone(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete a book, returning it first if it is on loan
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.mutate(|catalog| catalog.remove_book(&isbn)).await?;

    tracing::info!(isbn = removed.isbn(), title = removed.title(), "book deleted");
    state.broadcast(ServerEvent::BookRemoved { isbn });
    Ok(StatusCode::NO_CONTENT)
}
