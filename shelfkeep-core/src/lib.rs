//! Shelfkeep Core Library
//!
//! Circulation logic for a small lending library: books, members, loans,
//! due dates and the rules that tie them together, plus whole-catalog
//! persistence. Presentation layers (the CLI and the HTTP server) call into
//! [`Catalog`] and never touch book or member state directly.

pub mod catalog;
pub mod error;
pub mod sample;
pub mod storage;
pub mod types;

pub use catalog::{Catalog, CatalogStats, CirculationResult, MostBorrowed, ReturnReceipt};
pub use error::{CirculationError, StorageError};
pub use storage::{CatalogStore, JsonFileStore, MemoryStore};
pub use types::{
    today, Book, BorrowEvent, BorrowEventKind, Loan, Member, BORROW_LIMIT, LOAN_PERIOD_DAYS,
};
