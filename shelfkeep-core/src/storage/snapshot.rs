//! Versioned snapshot format

use super::StorageResult;
use crate::catalog::Catalog;
use crate::error::StorageError;
use crate::types::{Book, Member, BORROW_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Format version written by this build
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted form of a catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub books: Vec<Book>,
    pub members: Vec<Member>,
}

impl From<&Catalog> for Snapshot {
    fn from(catalog: &Catalog) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            books: catalog.list_books().to_vec(),
            members: catalog.list_members().to_vec(),
        }
    }
}

/// Just enough of a snapshot to check its version before reading the rest
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Serialize a catalog to snapshot bytes
pub fn encode(catalog: &Catalog) -> StorageResult<Vec<u8>> {
    serde_json::to_vec_pretty(&Snapshot::from(catalog))
        .map_err(|e| StorageError::BackendError(e.to_string()))
}

/// Parse snapshot bytes back into a catalog
///
/// Duplicate ISBNs or member IDs are rejected. Loans that the book and
/// member records disagree about are kept and logged.
pub fn decode(data: &[u8]) -> StorageResult<Catalog> {
    let probe: VersionProbe =
        serde_json::from_slice(data).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    if probe.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: probe.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    let snapshot: Snapshot =
        serde_json::from_slice(data).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    validate(&snapshot)?;

    Ok(Catalog::from_parts(snapshot.books, snapshot.members))
}

fn validate(snapshot: &Snapshot) -> StorageResult<()> {
    let mut isbns = HashSet::new();
    for book in &snapshot.books {
        if !isbns.insert(book.isbn()) {
            return Err(StorageError::Corrupt(format!(
                "duplicate ISBN {}",
                book.isbn()
            )));
        }
    }

    let mut ids = HashSet::new();
    for member in &snapshot.members {
        if !ids.insert(member.member_id()) {
            return Err(StorageError::Corrupt(format!(
                "duplicate member ID {}",
                member.member_id()
            )));
        }
    }

    for book in &snapshot.books {
        let Some(borrower) = book.borrower_id() else {
            continue;
        };
        let listed = snapshot
            .members
            .iter()
            .find(|m| m.member_id() == borrower)
            .is_some_and(|m| m.has_borrowed(book.isbn()));
        if !listed {
            tracing::warn!(
                isbn = book.isbn(),
                borrower,
                "loaned book is missing from its borrower's list"
            );
        }
    }

    for member in &snapshot.members {
        if member.borrowed_books().len() > BORROW_LIMIT {
            tracing::warn!(
                member_id = member.member_id(),
                held = member.borrowed_books().len(),
                "member holds more books than the borrow limit"
            );
        }
        for isbn in member.borrowed_books() {
            let lent_here = snapshot
                .books
                .iter()
                .find(|b| b.isbn() == isbn)
                .is_some_and(|b| b.borrower_id() == Some(member.member_id()));
            if !lent_here {
                tracing::warn!(
                    member_id = member.member_id(),
                    isbn = %isbn,
                    "member lists a book that is not lent to them"
                );
            }
        }
    }

    Ok(())
}
