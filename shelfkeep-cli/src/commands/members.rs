//! Member commands

use super::Session;
use anyhow::{Context, Result};
use serde::Serialize;
use shelfkeep_core::{BorrowEvent, Member};

/// Member output
#[derive(Serialize)]
struct MemberInfo<'a> {
    name: &'a str,
    member_id: &'a str,
    borrowed_books: &'a [String],
    can_borrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<&'a [BorrowEvent]>,
}

impl<'a> MemberInfo<'a> {
    fn new(member: &'a Member, with_history: bool) -> Self {
        Self {
            name: member.name(),
            member_id: member.member_id(),
            borrowed_books: member.borrowed_books(),
            can_borrow: member.can_borrow(),
            history: with_history.then(|| member.history()),
        }
    }
}

/// Register a member
pub fn add_member(session: &mut Session, name: &str, member_id: &str) -> Result<()> {
    let member = session.catalog.add_member(name, member_id)?;
    println!("Added member {}", member);
    session.save()
}

/// Remove a member and take back their books
pub fn remove_member(session: &mut Session, member_id: &str) -> Result<()> {
    let held: Vec<String> = session
        .catalog
        .loaned_books()
        .into_iter()
        .filter(|b| b.borrower_id() == Some(member_id))
        .map(|b| b.isbn().to_string())
        .collect();
    let member = session.catalog.remove_member(member_id)?;
    for isbn in &held {
        tracing::info!("Took {} back from {}", isbn, member_id);
    }
    println!("Removed member {} ({})", member.name(), member.member_id());
    session.save()
}

/// List members, optionally filtered
pub fn list_members(session: &Session, search: Option<&str>, json: bool) -> Result<()> {
    let members: Vec<&Member> = match search {
        Some(query) => session.catalog.search_members(query),
        None => session.catalog.list_members().iter().collect(),
    };

    if json {
        let infos: Vec<MemberInfo> = members.iter().map(|m| MemberInfo::new(m, false)).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if members.is_empty() {
        println!("No members found");
    }
    for member in members {
        println!("{}", member);
    }
    Ok(())
}

/// Display one member and their borrow history
pub fn show_member(session: &Session, member_id: &str, json: bool) -> Result<()> {
    let member = session
        .catalog
        .find_member(member_id)
        .with_context(|| format!("No member with ID {}", member_id))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&MemberInfo::new(member, true))?
        );
        return Ok(());
    }

    println!("Name:           {}", member.name());
    println!("Member ID:      {}", member.member_id());
    if member.borrowed_books().is_empty() {
        println!("Borrowed Books: None");
    } else {
        println!("Borrowed Books: {}", member.borrowed_books().join(", "));
    }
    if !member.history().is_empty() {
        println!("History:");
        for event in member.history() {
            println!("  {} {}", event.date, event);
        }
    }
    Ok(())
}
