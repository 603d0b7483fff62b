//! The catalog: owner of all books and members and of every circulation rule
//!
//! Books and members live in insertion-ordered vectors and every lookup is a
//! linear scan, first match wins. Callers only ever see shared references or
//! owned copies, so the cross-entity invariants can only change through the
//! operations below:
//!
//! - a book is on loan iff it has a borrower, a borrowed date and a due date
//! - every ISBN in a member's borrowed list names a book lent to that member
//! - no member holds more than [`BORROW_LIMIT`] books

use crate::error::CirculationError;
use crate::types::{today, Book, Loan, Member, BORROW_LIMIT};
use chrono::NaiveDate;
use serde::Serialize;

/// Result type for catalog operations
pub type CirculationResult<T> = std::result::Result<T, CirculationError>;

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReceipt {
    pub isbn: String,

    /// Borrower recorded on the book at the time of return
    pub borrower_id: String,

    pub borrowed_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_date: NaiveDate,

    /// False when no member matched the recorded borrower
    pub member_updated: bool,
}

impl ReturnReceipt {
    pub fn was_overdue(&self) -> bool {
        self.returned_date > self.due_date
    }
}

/// Live counts over the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_books: usize,
    pub total_members: usize,
    pub active_loans: usize,
    pub overdue_loans: usize,
    pub most_borrowed: Option<MostBorrowed>,
}

/// The book held by the most members right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostBorrowed {
    pub isbn: String,
    pub title: String,
    pub borrowers: usize,
}

/// In-memory library of books and members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
    members: Vec<Member>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-validated collections
    pub(crate) fn from_parts(books: Vec<Book>, members: Vec<Member>) -> Self {
        Self { books, members }
    }

    /// Add an available book; ISBNs must be unique
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        isbn: &str,
    ) -> CirculationResult<&Book> {
        let title = require("title", title)?;
        let author = require("author", author)?;
        let isbn = require("isbn", isbn)?;
        if self.find_book(isbn).is_some() {
            return Err(CirculationError::DuplicateIsbn(isbn.to_string()));
        }

        self.books.push(Book::new(title, author, isbn));
        tracing::debug!(isbn, title, "added book");
        Ok(&self.books[self.books.len() - 1])
    }

    /// Remove a book, returning it first if it is on loan
    pub fn remove_book(&mut self, isbn: &str) -> CirculationResult<Book> {
        let pos = self
            .book_position(isbn)
            .ok_or_else(|| CirculationError::BookNotFound(isbn.to_string()))?;

        // No-op for an available book.
        self.return_at(pos, None, today());

        let book = self.books.remove(pos);
        tracing::debug!(isbn, "removed book");
        Ok(book)
    }

    /// Add a member with an empty borrow list; member IDs must be unique
    pub fn add_member(&mut self, name: &str, member_id: &str) -> CirculationResult<&Member> {
        let name = require("name", name)?;
        let member_id = require("member_id", member_id)?;
        if self.find_member(member_id).is_some() {
            return Err(CirculationError::DuplicateMemberId(member_id.to_string()));
        }

        self.members.push(Member::new(name, member_id));
        tracing::debug!(member_id, name, "added member");
        Ok(&self.members[self.members.len() - 1])
    }

    /// Remove a member, returning every book they hold first
    pub fn remove_member(&mut self, member_id: &str) -> CirculationResult<Member> {
        let pos = self
            .member_position(member_id)
            .ok_or_else(|| CirculationError::MemberNotFound(member_id.to_string()))?;

        // Returning mutates the member's list, so walk a copy.
        let held = self.members[pos].borrowed_books().to_vec();
        let date = today();
        for isbn in &held {
            match self.loaned_position(isbn) {
                Some(book_pos) if self.books[book_pos].borrower_id() == Some(member_id) => {
                    self.return_at(book_pos, Some(member_id), date);
                }
                Some(_) => tracing::warn!(
                    member_id,
                    isbn = %isbn,
                    "member lists a book that is not lent to them"
                ),
                None => tracing::warn!(
                    member_id,
                    isbn = %isbn,
                    "member lists a book that is not on loan"
                ),
            }
        }

        // Positions are stable: returns never add or remove members.
        let member = self.members.remove(pos);
        tracing::debug!(member_id, returned = held.len(), "removed member");
        Ok(member)
    }

    /// Lend a book to a member as of today
    pub fn borrow_book(&mut self, isbn: &str, member_id: &str) -> CirculationResult<&Book> {
        self.borrow_book_on(isbn, member_id, today())
    }

    /// Lend a book to a member with an explicit borrow date
    pub fn borrow_book_on(
        &mut self,
        isbn: &str,
        member_id: &str,
        date: NaiveDate,
    ) -> CirculationResult<&Book> {
        let book_pos = match self.available_position(isbn) {
            Some(pos) => pos,
            None if self.find_book(isbn).is_some() => {
                return Err(CirculationError::NotAvailable(isbn.to_string()))
            }
            None => return Err(CirculationError::BookNotFound(isbn.to_string())),
        };

        let member_pos = self
            .member_position(member_id)
            .ok_or_else(|| CirculationError::MemberNotFound(member_id.to_string()))?;
        if !self.members[member_pos].can_borrow() {
            return Err(CirculationError::BorrowLimitExceeded {
                member_id: member_id.to_string(),
                limit: BORROW_LIMIT,
            });
        }

        // Both sides checked; nothing below can fail.
        self.books[book_pos].lend(member_id, date);
        self.members[member_pos].record_borrow(isbn, date);
        tracing::debug!(isbn, member_id, %date, "book borrowed");

        Ok(&self.books[book_pos])
    }

    /// Take a book back as of today
    ///
    /// The borrower recorded on the book decides whose list is updated;
    /// `member_id` is only cross-checked.
    pub fn return_book(
        &mut self,
        isbn: &str,
        member_id: Option<&str>,
    ) -> CirculationResult<ReturnReceipt> {
        self.return_book_on(isbn, member_id, today())
    }

    /// Take a book back with an explicit return date
    pub fn return_book_on(
        &mut self,
        isbn: &str,
        member_id: Option<&str>,
        date: NaiveDate,
    ) -> CirculationResult<ReturnReceipt> {
        let pos = match self.loaned_position(isbn) {
            Some(pos) => pos,
            None if self.find_book(isbn).is_some() => {
                return Err(CirculationError::NotOnLoan(isbn.to_string()))
            }
            None => return Err(CirculationError::BookNotFound(isbn.to_string())),
        };

        self.return_at(pos, member_id, date)
            .ok_or_else(|| CirculationError::NotOnLoan(isbn.to_string()))
    }

    /// Return transition for the book at `pos`; `None` if it was not on loan
    fn return_at(
        &mut self,
        pos: usize,
        claimed: Option<&str>,
        date: NaiveDate,
    ) -> Option<ReturnReceipt> {
        let loan: Loan = self.books[pos].take_loan()?;
        let isbn = self.books[pos].isbn().to_string();
        let borrower_id = loan.borrower_id().to_string();

        if let Some(claimed) = claimed.filter(|c| *c != borrower_id) {
            tracing::warn!(
                isbn = %isbn,
                claimed,
                recorded = %borrower_id,
                "return requested for a different member than the recorded borrower"
            );
        }

        let member_updated = match self.member_position(&borrower_id) {
            Some(member_pos) => {
                if !self.members[member_pos].record_return(&isbn, date) {
                    tracing::warn!(
                        isbn = %isbn,
                        borrower = %borrower_id,
                        "borrower did not list the returned book"
                    );
                }
                true
            }
            None => {
                tracing::warn!(
                    isbn = %isbn,
                    borrower = %borrower_id,
                    "returned book's borrower is not a member"
                );
                false
            }
        };
        tracing::debug!(isbn = %isbn, borrower = %borrower_id, %date, "book returned");

        Some(ReturnReceipt {
            isbn,
            borrower_id,
            borrowed_date: loan.borrowed_date(),
            due_date: loan.due_date(),
            returned_date: date,
            member_updated,
        })
    }

    /// Books whose title or author contains `query` (case-insensitive) or whose ISBN equals it
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.matches(query)).collect()
    }

    /// Members whose name or ID contains `query` (case-insensitive)
    pub fn search_members(&self, query: &str) -> Vec<&Member> {
        self.members.iter().filter(|m| m.matches(query)).collect()
    }

    pub fn list_books(&self) -> &[Book] {
        &self.books
    }

    pub fn list_members(&self) -> &[Member] {
        &self.members
    }

    pub fn find_book(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn() == isbn)
    }

    pub fn find_member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.member_id() == member_id)
    }

    pub fn available_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_available()).collect()
    }

    /// Books currently on loan
    pub fn loaned_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| !b.is_available()).collect()
    }

    pub fn overdue_books(&self) -> Vec<&Book> {
        self.overdue_books_on(today())
    }

    pub fn overdue_books_on(&self, date: NaiveDate) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_overdue_on(date)).collect()
    }

    pub fn total_books(&self) -> usize {
        self.books.len()
    }

    pub fn total_members(&self) -> usize {
        self.members.len()
    }

    /// The book listed by the most members right now, with that count.
    ///
    /// Counts current loans only, not history. Ties go to the earlier book;
    /// `None` when nothing is borrowed.
    pub fn most_borrowed_book(&self) -> Option<(&Book, usize)> {
        let mut best: Option<(&Book, usize)> = None;
        for book in &self.books {
            let count = self
                .members
                .iter()
                .filter(|m| m.has_borrowed(book.isbn()))
                .count();
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((book, count));
            }
        }
        best
    }

    pub fn stats(&self) -> CatalogStats {
        self.stats_on(today())
    }

    pub fn stats_on(&self, date: NaiveDate) -> CatalogStats {
        CatalogStats {
            total_books: self.total_books(),
            total_members: self.total_members(),
            active_loans: self.books.iter().filter(|b| !b.is_available()).count(),
            overdue_loans: self.books.iter().filter(|b| b.is_overdue_on(date)).count(),
            most_borrowed: self
                .most_borrowed_book()
                .map(|(book, borrowers)| MostBorrowed {
                    isbn: book.isbn().to_string(),
                    title: book.title().to_string(),
                    borrowers,
                }),
        }
    }

    fn book_position(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|b| b.isbn() == isbn)
    }

    fn available_position(&self, isbn: &str) -> Option<usize> {
        self.books
            .iter()
            .position(|b| b.isbn() == isbn && b.is_available())
    }

    fn loaned_position(&self, isbn: &str) -> Option<usize> {
        self.books
            .iter()
            .position(|b| b.isbn() == isbn && !b.is_available())
    }

    fn member_position(&self, member_id: &str) -> Option<usize> {
        self.members.iter().position(|m| m.member_id() == member_id)
    }
}

/// Trim `value` and reject it if empty
fn require<'a>(field: &'static str, value: &'a str) -> CirculationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(CirculationError::MissingField(field))
    } else {
        Ok(value)
    }
}
