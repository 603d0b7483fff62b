//! Demo data command

use super::Session;
use anyhow::{bail, Result};
use shelfkeep_core::{sample, today, Catalog};

/// Populate the catalog with sample books, members and overdue loans
pub fn seed(session: &mut Session, force: bool) -> Result<()> {
    let empty = session.catalog.total_books() == 0 && session.catalog.total_members() == 0;
    if !empty && !force {
        bail!("Catalog is not empty; use --force to replace it");
    }
    if !empty {
        tracing::info!(
            books = session.catalog.total_books(),
            members = session.catalog.total_members(),
            "Replacing existing catalog"
        );
    }

    let mut catalog = Catalog::new();
    sample::populate(&mut catalog, today())?;
    session.catalog = catalog;

    println!(
        "Seeded {} books and {} members",
        session.catalog.total_books(),
        session.catalog.total_members()
    );
    session.save()
}
