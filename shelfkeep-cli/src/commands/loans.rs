//! Borrow and return commands

use super::Session;
use anyhow::Result;

/// Lend a book to a member
pub fn borrow(session: &mut Session, isbn: &str, member_id: &str) -> Result<()> {
    let book = session.catalog.borrow_book(isbn, member_id)?;
    tracing::debug!(isbn, member_id, "book borrowed");
    if let Some(due) = book.due_date() {
        println!("{} borrowed by {}, due {}", book.title(), member_id, due);
    }
    session.save()
}

/// Take a book back
pub fn return_book(session: &mut Session, isbn: &str, member_id: Option<&str>) -> Result<()> {
    let receipt = session.catalog.return_book(isbn, member_id)?;

    print!("Book {} returned by {}", receipt.isbn, receipt.borrower_id);
    if receipt.was_overdue() {
        print!(" (overdue since {})", receipt.due_date);
    }
    println!();
    if !receipt.member_updated {
        tracing::warn!(
            "Borrower {} is not a registered member",
            receipt.borrower_id
        );
    }

    session.save()
}
