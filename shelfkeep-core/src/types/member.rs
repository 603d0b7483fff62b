//! The Member entity

use super::BorrowEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of books a member may hold at once
pub const BORROW_LIMIT: usize = 3;

/// A library patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    name: String,
    member_id: String,

    /// ISBNs currently held, in borrow order, never duplicated
    #[serde(default)]
    borrowed_books: Vec<String>,

    /// Append-only borrow/return log
    #[serde(default)]
    history: Vec<BorrowEvent>,
}

impl Member {
    /// Create a member with nothing borrowed
    pub fn new(name: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_id: member_id.into(),
            borrowed_books: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed_books
    }

    pub fn history(&self) -> &[BorrowEvent] {
        &self.history
    }

    /// Whether the member is below the borrow limit
    pub fn can_borrow(&self) -> bool {
        self.borrowed_books.len() < BORROW_LIMIT
    }

    pub fn has_borrowed(&self, isbn: &str) -> bool {
        self.borrowed_books.iter().any(|b| b == isbn)
    }

    /// Case-insensitive substring match on name or member ID
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.member_id.to_lowercase().contains(&needle)
    }

    /// Add `isbn` to the borrowed list.
    ///
    /// Does nothing and returns false when the member is at the limit or
    /// already holds the book.
    pub fn record_borrow(&mut self, isbn: &str, date: NaiveDate) -> bool {
        if !self.can_borrow() || self.has_borrowed(isbn) {
            return false;
        }
        self.borrowed_books.push(isbn.to_string());
        self.history.push(BorrowEvent::borrowed(isbn, date));
        true
    }

    /// Remove `isbn` from the borrowed list; absent ISBNs are ignored
    pub fn record_return(&mut self, isbn: &str, date: NaiveDate) -> bool {
        let Some(pos) = self.borrowed_books.iter().position(|b| b == isbn) else {
            return false;
        };
        self.borrowed_books.remove(pos);
        self.history.push(BorrowEvent::returned(isbn, date));
        true
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.member_id)?;
        if self.borrowed_books.is_empty() {
            write!(f, " - no books borrowed")
        } else {
            write!(f, " - borrowed: {}", self.borrowed_books.join(", "))
        }
    }
}
