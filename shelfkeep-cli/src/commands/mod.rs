//! CLI command implementations

mod books;
mod loans;
mod members;
mod seed;
mod stats;

pub use books::{add_book, list_books, remove_book, search, show_book, Listing};
pub use loans::{borrow, return_book};
pub use members::{add_member, list_members, remove_member, show_member};
pub use seed::seed;
pub use stats::stats;

use anyhow::{Context, Result};
use shelfkeep_core::{Catalog, CatalogStore, JsonFileStore};
use std::path::Path;

/// A loaded catalog plus the file it came from
pub struct Session {
    store: JsonFileStore,
    pub catalog: Catalog,
}

impl Session {
    /// Load the catalog, starting empty if the file does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        let store = JsonFileStore::new(path);
        let catalog = store
            .load_or_default()
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            books = catalog.total_books(),
            members = catalog.total_members(),
            "catalog loaded"
        );
        Ok(Self { store, catalog })
    }

    /// Write the catalog back to its file
    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.catalog)
            .with_context(|| format!("Failed to save catalog to {}", self.store.path().display()))?;
        tracing::debug!("Saved catalog to {:?}", self.store.path());
        Ok(())
    }
}
