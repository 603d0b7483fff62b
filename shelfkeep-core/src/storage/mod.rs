//! Whole-catalog persistence
//!
//! A catalog is saved as one versioned JSON document holding the ordered
//! book and member collections. Loading replaces both wholesale; there are
//! no partial updates.

mod snapshot;

pub use snapshot::{decode, encode, Snapshot, SNAPSHOT_VERSION};

use crate::catalog::Catalog;
use crate::error::StorageError;
use std::path::{Path, PathBuf};

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A place a catalog can be loaded from and saved to
pub trait CatalogStore: Send + Sync {
    /// Read the stored catalog; `StorageError::NotFound` if nothing was saved yet
    fn load(&self) -> StorageResult<Catalog>;

    /// Replace the stored catalog
    fn save(&self, catalog: &Catalog) -> StorageResult<()>;

    /// Load, falling back to an empty catalog when nothing was saved yet
    fn load_or_default(&self) -> StorageResult<Catalog> {
        match self.load() {
            Ok(catalog) => Ok(catalog),
            Err(StorageError::NotFound(detail)) => {
                tracing::info!("No saved catalog ({}), starting empty", detail);
                Ok(Catalog::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Catalog stored as a JSON file on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> StorageResult<Catalog> {
        let data =
            std::fs::read(&self.path).map_err(|e| StorageError::from_io(e, &self.path))?;
        let catalog = decode(&data)?;
        tracing::debug!(
            path = %self.path.display(),
            books = catalog.total_books(),
            members = catalog.total_members(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Writes to a temp file then renames so a failed save never truncates the old data
    fn save(&self, catalog: &Catalog) -> StorageResult<()> {
        let data = encode(catalog)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::from_io(e, parent))?;
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, &data).map_err(|e| StorageError::from_io(e, &temp_path))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StorageError::from_io(e, &self.path))?;

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "saved catalog");
        Ok(())
    }
}

/// In-memory store (for testing)
#[derive(Default)]
pub struct MemoryStore {
    data: std::sync::RwLock<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of the last save, if any
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.read().ok().and_then(|d| d.clone())
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> StorageResult<Catalog> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        match data.as_deref() {
            Some(bytes) => decode(bytes),
            None => Err(StorageError::NotFound("memory store is empty".to_string())),
        }
    }

    fn save(&self, catalog: &Catalog) -> StorageResult<()> {
        let bytes = encode(catalog)?;
        *self
            .data
            .write()
            .map_err(|e| StorageError::BackendError(e.to_string()))? = Some(bytes);
        Ok(())
    }
}
