//! Borrow history records kept per member

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowEventKind {
    Borrowed,
    Returned,
}

/// A single entry in a member's append-only borrow log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowEvent {
    pub kind: BorrowEventKind,
    pub isbn: String,
    pub date: NaiveDate,
}

impl BorrowEvent {
    pub fn borrowed(isbn: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind: BorrowEventKind::Borrowed,
            isbn: isbn.into(),
            date,
        }
    }

    pub fn returned(isbn: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind: BorrowEventKind::Returned,
            isbn: isbn.into(),
            date,
        }
    }
}

impl fmt::Display for BorrowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BorrowEventKind::Borrowed => write!(f, "Borrowed: {}", self.isbn),
            BorrowEventKind::Returned => write!(f, "Returned: {}", self.isbn),
        }
    }
}
