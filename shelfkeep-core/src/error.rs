//! Error types for Shelfkeep Core

use thiserror::Error;

/// Expected domain failures reported by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CirculationError {
    #[error("No book with ISBN {0}")]
    BookNotFound(String),

    #[error("No member with ID {0}")]
    MemberNotFound(String),

    #[error("Book {0} is already on loan")]
    NotAvailable(String),

    #[error("Book {0} is not on loan")]
    NotOnLoan(String),

    #[error("Member {member_id} has reached the borrow limit of {limit}")]
    BorrowLimitExceeded { member_id: String, limit: usize },

    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    #[error("A member with ID {0} already exists")]
    DuplicateMemberId(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors that occur while loading or saving catalog snapshots
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        let detail = format!("{}: {}", path.display(), err);
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(detail),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(detail),
            _ => StorageError::BackendError(detail),
        }
    }
}
