//! Book commands

use super::Session;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use shelfkeep_core::{today, Book};

/// Which books `books` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    All,
    Available,
    OnLoan,
    Overdue,
}

/// Book output
#[derive(Serialize)]
struct BookInfo<'a> {
    title: &'a str,
    author: &'a str,
    isbn: &'a str,
    available: bool,
    borrower_id: Option<&'a str>,
    borrowed_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    overdue: bool,
}

impl<'a> From<&'a Book> for BookInfo<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: book.title(),
            author: book.author(),
            isbn: book.isbn(),
            available: book.is_available(),
            borrower_id: book.borrower_id(),
            borrowed_date: book.borrowed_date(),
            due_date: book.due_date(),
            overdue: book.is_overdue(),
        }
    }
}

/// One line per book, marking overdue loans
fn print_books(books: &[&Book], json: bool) -> Result<()> {
    if json {
        let infos: Vec<BookInfo> = books.iter().map(|b| BookInfo::from(*b)).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books found");
    }
    for book in books {
        if book.is_overdue() {
            println!("{} [OVERDUE]", book);
        } else {
            println!("{}", book);
        }
    }
    Ok(())
}

/// Add a book
pub fn add_book(session: &mut Session, title: &str, author: &str, isbn: &str) -> Result<()> {
    let book = session.catalog.add_book(title, author, isbn)?;
    println!("Added {}", book);
    session.save()
}

/// Remove a book
pub fn remove_book(session: &mut Session, isbn: &str) -> Result<()> {
    let borrower = session
        .catalog
        .find_book(isbn)
        .and_then(|b| b.borrower_id())
        .map(str::to_string);
    let book = session.catalog.remove_book(isbn)?;
    if let Some(borrower) = borrower {
        tracing::info!("Took {} back from {} before removing it", isbn, borrower);
    }
    println!("Removed {} by {} (ISBN {})", book.title(), book.author(), book.isbn());
    session.save()
}

/// Search books by title, author or ISBN
pub fn search(session: &Session, query: &str, json: bool) -> Result<()> {
    print_books(&session.catalog.search_books(query), json)
}

/// List books
pub fn list_books(session: &Session, listing: Listing, json: bool) -> Result<()> {
    let catalog = &session.catalog;
    let books: Vec<&Book> = match listing {
        Listing::All => catalog.list_books().iter().collect(),
        Listing::Available => catalog.available_books(),
        Listing::OnLoan => catalog.loaned_books(),
        Listing::Overdue => catalog.overdue_books_on(today()),
    };
    print_books(&books, json)
}

/// Display one book
pub fn show_book(session: &Session, isbn: &str, json: bool) -> Result<()> {
    let book = session
        .catalog
        .find_book(isbn)
        .with_context(|| format!("No book with ISBN {}", isbn))?;
    let info = BookInfo::from(book);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());
    println!("Title:         {}", info.title);
    println!("Author:        {}", info.author);
    println!("ISBN:          {}", info.isbn);
    println!(
        "Availability:  {}",
        if info.available { "Available" } else { "Not Available" }
    );
    println!("Borrower ID:   {}", or_na(info.borrower_id.map(str::to_string)));
    println!("Borrowed Date: {}", or_na(info.borrowed_date.map(|d| d.to_string())));
    println!(
        "Due Date:      {}{}",
        or_na(info.due_date.map(|d| d.to_string())),
        if info.overdue { " (Overdue)" } else { "" }
    );
    Ok(())
}
