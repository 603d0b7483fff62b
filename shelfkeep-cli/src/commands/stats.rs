//! Statistics command

use super::Session;
use anyhow::Result;

/// Shown when no book is on loan
const NOTHING_BORROWED: &str = "No books are currently borrowed";

/// Display circulation statistics
pub fn stats(session: &Session, json: bool) -> Result<()> {
    let stats = session.catalog.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Books:         {}", stats.total_books);
    println!("Members:       {}", stats.total_members);
    println!("Active loans:  {}", stats.active_loans);
    println!("Overdue loans: {}", stats.overdue_loans);
    match &stats.most_borrowed {
        Some(most) => println!(
            "Most borrowed: {} (ISBN {}, {} borrower{})",
            most.title,
            most.isbn,
            most.borrowers,
            if most.borrowers == 1 { "" } else { "s" }
        ),
        None => println!("Most borrowed: {}", NOTHING_BORROWED),
    }
    Ok(())
}
