//! The Book entity and its loan state

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of days a book may be kept before it becomes overdue
pub const LOAN_PERIOD_DAYS: u64 = 7;

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// An active loan attached to a book
///
/// The due date is always derived from the borrowed date, so the two can
/// never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LoanRecord", into = "LoanRecord")]
pub struct Loan {
    borrower_id: String,
    borrowed_date: NaiveDate,
}

impl Loan {
    pub(crate) fn new(borrower_id: impl Into<String>, borrowed_date: NaiveDate) -> Self {
        Self {
            borrower_id: borrower_id.into(),
            borrowed_date,
        }
    }

    /// ID of the member holding the book
    pub fn borrower_id(&self) -> &str {
        &self.borrower_id
    }

    /// Date the book was lent out
    pub fn borrowed_date(&self) -> NaiveDate {
        self.borrowed_date
    }

    /// Date the book must be returned by
    pub fn due_date(&self) -> NaiveDate {
        self.borrowed_date
            .checked_add_days(Days::new(LOAN_PERIOD_DAYS))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` is strictly after the due date
    pub fn is_overdue_on(&self, date: NaiveDate) -> bool {
        date > self.due_date()
    }
}

/// On-disk shape of a loan; `due_date` is written for readers and ignored on load
#[derive(Serialize, Deserialize)]
struct LoanRecord {
    borrower_id: String,
    borrowed_date: NaiveDate,
    #[serde(default, skip_deserializing)]
    due_date: Option<NaiveDate>,
}

impl From<LoanRecord> for Loan {
    fn from(record: LoanRecord) -> Self {
        Loan::new(record.borrower_id, record.borrowed_date)
    }
}

impl From<Loan> for LoanRecord {
    fn from(loan: Loan) -> Self {
        let due_date = Some(loan.due_date());
        Self {
            borrower_id: loan.borrower_id,
            borrowed_date: loan.borrowed_date,
            due_date,
        }
    }
}

/// A catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,

    /// Present iff the book is on loan
    #[serde(default)]
    loan: Option<Loan>,
}

impl Book {
    /// Create an available book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            loan: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    pub fn loan(&self) -> Option<&Loan> {
        self.loan.as_ref()
    }

    pub fn borrower_id(&self) -> Option<&str> {
        self.loan.as_ref().map(Loan::borrower_id)
    }

    pub fn borrowed_date(&self) -> Option<NaiveDate> {
        self.loan.as_ref().map(Loan::borrowed_date)
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.loan.as_ref().map(Loan::due_date)
    }

    /// Whether the book is past its due date as of today
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(today())
    }

    /// Whether the book is past its due date as of `date`
    pub fn is_overdue_on(&self, date: NaiveDate) -> bool {
        self.loan.as_ref().is_some_and(|loan| loan.is_overdue_on(date))
    }

    /// Case-insensitive title/author substring match, or exact ISBN match
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.isbn == query
    }

    pub(crate) fn lend(&mut self, borrower_id: &str, date: NaiveDate) {
        self.loan = Some(Loan::new(borrower_id, date));
    }

    /// Clear the loan, handing back whatever was there
    pub(crate) fn take_loan(&mut self) -> Option<Loan> {
        self.loan.take()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} (ISBN {})",
            self.title, self.author, self.isbn
        )?;
        match &self.loan {
            None => write!(f, " - available"),
            Some(loan) => write!(
                f,
                " - on loan to {} since {}, due {}",
                loan.borrower_id,
                loan.borrowed_date,
                loan.due_date()
            ),
        }
    }
}
