//! Integration tests for the Shelfkeep CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Command bound to a catalog file inside `dir`
fn shelfkeep(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shelfkeep").unwrap();
    cmd.env_remove("SHELFKEEP_DATA")
        .arg("--data")
        .arg(data_path(dir));
    cmd
}

fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("library.json")
}

fn add_book(dir: &TempDir, isbn: &str, title: &str) {
    shelfkeep(dir)
        .args(["add-book", "--title", title, "--author", "Author", "--isbn", isbn])
        .assert()
        .success();
}

fn add_member(dir: &TempDir, id: &str) {
    shelfkeep(dir)
        .args(["add-member", "--name", "Test Member", "--id", id])
        .assert()
        .success();
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("Failed to run command");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("Invalid JSON output")
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("shelfkeep").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("borrow"))
        .stdout(predicate::str::contains("return"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("shelfkeep").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shelfkeep"));
}

#[test]
fn test_books_filters_conflict() {
    let temp_dir = TempDir::new().unwrap();
    shelfkeep(&temp_dir)
        .args(["books", "--available", "--overdue"])
        .assert()
        .failure();
}

#[test]
fn test_empty_catalog_without_file() {
    let temp_dir = TempDir::new().unwrap();

    shelfkeep(&temp_dir)
        .arg("books")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found"));

    // Read-only commands do not create the file
    assert!(!data_path(&temp_dir).exists());
}

#[test]
fn test_add_book_creates_file() {
    let temp_dir = TempDir::new().unwrap();

    shelfkeep(&temp_dir)
        .args(["add-book", "--title", "Dune", "--author", "Frank Herbert", "--isbn", "111"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Dune by Frank Herbert"));

    assert!(data_path(&temp_dir).exists());

    shelfkeep(&temp_dir)
        .args(["search", "herbert"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ISBN 111"));
}

#[test]
fn test_add_book_duplicate_isbn() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "111", "Book 1");

    shelfkeep(&temp_dir)
        .args(["add-book", "--title", "Other", "--author", "A", "--isbn", "111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_add_book_blank_title() {
    let temp_dir = TempDir::new().unwrap();

    shelfkeep(&temp_dir)
        .args(["add-book", "--title", "  ", "--author", "A", "--isbn", "111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn test_borrow_and_return_flow() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "111", "Book 1");
    add_member(&temp_dir, "MEM001");

    shelfkeep(&temp_dir)
        .args(["borrow", "111", "MEM001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("borrowed by MEM001, due"));

    let book = json_output(shelfkeep(&temp_dir).args(["show-book", "111", "--json"]));
    assert_eq!(book["available"], false);
    assert_eq!(book["borrower_id"], "MEM001");

    shelfkeep(&temp_dir)
        .args(["borrow", "111", "MEM001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already on loan"));

    shelfkeep(&temp_dir)
        .args(["return", "111"])
        .assert()
        .success()
        .stdout(predicate::str::contains("returned by MEM001"));

    let member = json_output(shelfkeep(&temp_dir).args(["show-member", "MEM001", "--json"]));
    assert_eq!(member["borrowed_books"], serde_json::json!([]));
    assert_eq!(member["history"].as_array().unwrap().len(), 2);

    shelfkeep(&temp_dir)
        .args(["return", "111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not on loan"));
}

#[test]
fn test_borrow_limit() {
    let temp_dir = TempDir::new().unwrap();
    add_member(&temp_dir, "MEMLIMIT");
    for n in 1..=4 {
        add_book(&temp_dir, &format!("LIM{n}"), &format!("Limit Book {n}"));
    }
    for n in 1..=3 {
        shelfkeep(&temp_dir)
            .args(["borrow", &format!("LIM{n}"), "MEMLIMIT"])
            .assert()
            .success();
    }

    shelfkeep(&temp_dir)
        .args(["borrow", "LIM4", "MEMLIMIT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("borrow limit of 3"));
}

#[test]
fn test_borrow_unknown_member() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "111", "Book 1");

    shelfkeep(&temp_dir)
        .args(["borrow", "111", "NOBODY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No member with ID NOBODY"));
}

#[test]
fn test_remove_member_returns_books() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "111", "Book 1");
    add_member(&temp_dir, "MEM001");
    shelfkeep(&temp_dir)
        .args(["borrow", "111", "MEM001"])
        .assert()
        .success();

    shelfkeep(&temp_dir)
        .args(["remove-member", "MEM001"])
        .assert()
        .success();

    let books = json_output(shelfkeep(&temp_dir).args(["books", "--available", "--json"]));
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["isbn"], "111");
}

#[test]
fn test_seed_and_stats() {
    let temp_dir = TempDir::new().unwrap();

    shelfkeep(&temp_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books are currently borrowed"));

    shelfkeep(&temp_dir)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 10 books and 10 members"));

    let stats = json_output(shelfkeep(&temp_dir).args(["stats", "--json"]));
    assert_eq!(stats["total_books"], 10);
    assert_eq!(stats["total_members"], 10);
    assert_eq!(stats["active_loans"], 2);
    assert_eq!(stats["overdue_loans"], 2);

    shelfkeep(&temp_dir)
        .args(["books", "--overdue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OVERDUE]"));
}

#[test]
fn test_seed_refuses_non_empty_catalog() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "X1", "Mine");

    shelfkeep(&temp_dir)
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    shelfkeep(&temp_dir)
        .args(["seed", "--force"])
        .assert()
        .success();

    shelfkeep(&temp_dir)
        .args(["show-book", "X1"])
        .assert()
        .failure();
}

#[test]
fn test_members_search() {
    let temp_dir = TempDir::new().unwrap();
    add_member(&temp_dir, "MEM001");
    add_member(&temp_dir, "VIP002");

    let members = json_output(shelfkeep(&temp_dir).args(["members", "--search", "vip", "--json"]));
    assert_eq!(members.as_array().unwrap().len(), 1);
    assert_eq!(members[0]["member_id"], "VIP002");
}

#[test]
fn test_corrupt_data_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(data_path(&temp_dir), "not json").unwrap();

    shelfkeep(&temp_dir)
        .arg("books")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

#[test]
fn test_verbose_logs_catalog_activity() {
    let temp_dir = TempDir::new().unwrap();
    add_book(&temp_dir, "111", "Book 1");
    add_member(&temp_dir, "MEM001");
    shelfkeep(&temp_dir)
        .args(["borrow", "111", "MEM001"])
        .assert()
        .success();

    shelfkeep(&temp_dir)
        .args(["--verbose", "books"])
        .assert()
        .success()
        .stderr(predicate::str::contains("catalog loaded"));

    shelfkeep(&temp_dir)
        .args(["remove-member", "MEM001"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Took 111 back from MEM001"));
}
