//! Core entity types for the circulation domain

mod book;
mod history;
mod member;

pub use book::{today, Book, Loan, LOAN_PERIOD_DAYS};
pub use history::{BorrowEvent, BorrowEventKind};
pub use member::{Member, BORROW_LIMIT};
