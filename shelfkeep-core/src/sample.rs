//! Demo data for trying the system out

use crate::catalog::Catalog;
use crate::error::CirculationError;
use chrono::{Days, NaiveDate};

const SAMPLE_BOOKS: [(&str, &str, &str); 10] = [
    ("Book 1", "Author 1", "111111111"),
    ("Book 2", "Author 2", "222222222"),
    ("Book 3", "Author 3", "333333333"),
    ("Book 4", "Author 4", "444444444"),
    ("Book 5", "Author 5", "555555555"),
    ("Book 6", "Author 6", "666666666"),
    ("Book 7", "Author 7", "777777777"),
    ("Book 8", "Author 8", "888888888"),
    ("Book 9", "Author 9", "999999999"),
    ("Book 10", "Author 10", "101010101"),
];

/// Backdated loans, as (isbn, member, days ago); both end up overdue
const SAMPLE_LOANS: [(&str, &str, u64); 2] = [
    ("111111111", "MEM001", 14),
    ("222222222", "MEM002", 21),
];

/// Fill `catalog` with ten books, ten members and two overdue loans
pub fn populate(catalog: &mut Catalog, today: NaiveDate) -> Result<(), CirculationError> {
    for (title, author, isbn) in SAMPLE_BOOKS {
        catalog.add_book(title, author, isbn)?;
    }
    for n in 1..=10 {
        catalog.add_member(&format!("Member {n}"), &format!("MEM{n:03}"))?;
    }
    for (isbn, member_id, days_ago) in SAMPLE_LOANS {
        let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
        catalog.borrow_book_on(isbn, member_id, date)?;
    }
    tracing::info!(
        books = catalog.total_books(),
        members = catalog.total_members(),
        "populated sample catalog"
    );
    Ok(())
}
