//! End-to-end circulation tests for shelfkeep-core
//!
//! These walk the catalog through the same sequences a librarian would:
//! seed the demo data, lend, take back, hit the borrow limit, delete records
//! that are still referenced, then save and reload.

use chrono::Days;
use shelfkeep_core::sample;
use shelfkeep_core::{
    today, Catalog, CatalogStore, CirculationError, JsonFileStore, StorageError, BORROW_LIMIT,
};
use tempfile::TempDir;

fn seeded() -> Catalog {
    let mut catalog = Catalog::new();
    sample::populate(&mut catalog, today()).expect("sample data is consistent");
    catalog
}

#[test]
fn test_seeded_catalog_has_overdue_loans() {
    let catalog = seeded();
    let book = catalog.find_book("111111111").unwrap();
    assert!(book.is_overdue());
    assert_eq!(book.borrower_id(), Some("MEM001"));
    assert_eq!(catalog.overdue_books().len(), 2);
}

#[test]
fn test_add_then_find() {
    let mut catalog = seeded();
    catalog
        .add_book("Test Book", "Test Author", "123456789")
        .unwrap();
    catalog.add_member("Test Member", "MEM101").unwrap();

    assert!(catalog.list_books().iter().any(|b| b.isbn() == "123456789"));
    assert!(catalog
        .list_members()
        .iter()
        .any(|m| m.member_id() == "MEM101"));
}

#[test]
fn test_borrow_and_return() {
    let mut catalog = seeded();

    assert!(catalog.borrow_book("333333333", "MEM003").is_ok());
    assert!(!catalog.find_book("333333333").unwrap().is_available());

    assert!(catalog.return_book("333333333", Some("MEM003")).is_ok());
    assert!(catalog.find_book("333333333").unwrap().is_available());
    assert!(catalog
        .find_member("MEM003")
        .unwrap()
        .borrowed_books()
        .is_empty());
}

#[test]
fn test_return_without_member_id() {
    let mut catalog = seeded();
    let receipt = catalog.return_book("222222222", None).unwrap();
    assert_eq!(receipt.borrower_id, "MEM002");
    assert!(receipt.was_overdue());
}

#[test]
fn test_duplicates_are_rejected() {
    let mut catalog = seeded();

    let err = catalog
        .add_book("Duplicate Book", "Duplicate Author", "111111111")
        .unwrap_err();
    assert_eq!(err, CirculationError::DuplicateIsbn("111111111".into()));
    let count = catalog
        .list_books()
        .iter()
        .filter(|b| b.isbn() == "111111111")
        .count();
    assert_eq!(count, 1);

    let err = catalog
        .add_member("Duplicate Member", "MEM001")
        .unwrap_err();
    assert_eq!(err, CirculationError::DuplicateMemberId("MEM001".into()));
}

#[test]
fn test_borrow_limit() {
    let mut catalog = seeded();
    catalog.add_member("Limit Tester", "MEMLIMIT").unwrap();
    for n in 1..=4 {
        catalog
            .add_book(&format!("Limit Book {n}"), "Author", &format!("LIM{n}"))
            .unwrap();
    }

    assert!(catalog.borrow_book("LIM1", "MEMLIMIT").is_ok());
    assert!(catalog.borrow_book("LIM2", "MEMLIMIT").is_ok());
    assert!(catalog.borrow_book("LIM3", "MEMLIMIT").is_ok());
    assert!(matches!(
        catalog.borrow_book("LIM4", "MEMLIMIT"),
        Err(CirculationError::BorrowLimitExceeded { limit: BORROW_LIMIT, .. })
    ));
}

#[test]
fn test_delete_cascades() {
    let mut catalog = seeded();

    catalog.remove_member("MEM001").unwrap();
    assert!(catalog.find_book("111111111").unwrap().is_available());

    catalog.remove_book("222222222").unwrap();
    assert!(!catalog
        .find_member("MEM002")
        .unwrap()
        .has_borrowed("222222222"));
}

#[test]
fn test_search() {
    let catalog = seeded();
    let results = catalog.search_books("Book 1");
    assert!(!results.is_empty());
    assert!(results[0].title().contains("Book 1"));
    assert_eq!(catalog.search_books("book 1").len(), results.len());
}

#[test]
fn test_overdue_boundary() {
    let mut catalog = Catalog::new();
    catalog.add_book("Late", "Author", "1").unwrap();
    catalog.add_member("Reader", "MEM001").unwrap();

    let eight_days_ago = today().checked_sub_days(Days::new(8)).unwrap();
    let book = catalog
        .borrow_book_on("1", "MEM001", eight_days_ago)
        .unwrap();
    assert_eq!(
        book.due_date(),
        today().checked_sub_days(Days::new(1))
    );
    assert!(book.is_overdue());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("library.json"));

    let mut catalog = seeded();
    catalog.borrow_book("333333333", "MEM003").unwrap();
    store.save(&catalog).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, catalog);
    let isbns: Vec<_> = loaded.list_books().iter().map(|b| b.isbn()).collect();
    let expected: Vec<_> = catalog.list_books().iter().map(|b| b.isbn()).collect();
    assert_eq!(isbns, expected);
    assert_eq!(loaded.stats(), catalog.stats());
}

#[test]
fn test_save_to_unwritable_location_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"").unwrap();

    // A regular file where a directory is expected
    let store = JsonFileStore::new(blocker.join("library.json"));
    let err = store.save(&Catalog::new()).unwrap_err();
    assert!(!matches!(err, StorageError::NotFound(_) | StorageError::Corrupt(_)));
}
