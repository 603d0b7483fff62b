//! Application state

use crate::config::ServerConfig;
use crate::error::ApiError;
use anyhow::Result;
use chrono::NaiveDate;
use shelfkeep_core::{Catalog, CatalogStore, CirculationResult, JsonFileStore};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where the catalog is persisted
    pub store: Arc<dyn CatalogStore>,

    /// The live catalog; writers hold the lock for a whole operation
    pub catalog: Arc<RwLock<Catalog>>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    BookAdded { isbn: String, title: String },
    BookRemoved { isbn: String },
    MemberAdded { member_id: String, name: String },
    MemberRemoved { member_id: String },
    BookBorrowed { isbn: String, member_id: String, due_date: NaiveDate },
    BookReturned { isbn: String, member_id: String },

    /// An error occurred
    Error { message: String },
}

impl AppState {
    /// Load the catalog from the configured data directory
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_path).await?;

        let store: Arc<dyn CatalogStore> = Arc::new(JsonFileStore::new(config.catalog_path()));
        let catalog = {
            let store = Arc::clone(&store);
            tokio::task::spawn_blocking(move || store.load_or_default()).await??
        };
        tracing::info!(
            books = catalog.total_books(),
            members = catalog.total_members(),
            "catalog loaded"
        );

        Ok(Self::with_store(store, catalog))
    }

    /// Build state around an existing store and catalog
    pub fn with_store(store: Arc<dyn CatalogStore>, catalog: Catalog) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            store,
            catalog: Arc::new(RwLock::new(catalog)),
            event_tx,
        }
    }

    /// Write `catalog` to the store.
    ///
    /// Callers pass the catalog they hold the write guard for, so saves are
    /// ordered the same way as the mutations they record.
    pub async fn persist(&self, catalog: &Catalog) -> Result<(), ApiError> {
        let store = Arc::clone(&self.store);
        let snapshot = catalog.clone();
        let result = tokio::task::spawn_blocking(move || store.save(&snapshot))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        if let Err(e) = result {
            tracing::error!("Failed to save catalog: {}", e);
            self.broadcast(ServerEvent::Error {
                message: format!("Failed to save catalog: {}", e),
            });
            return Err(e.into());
        }
        Ok(())
    }

    /// Apply `op` to the catalog and persist the result.
    ///
    /// The write guard is held until the save finishes. If the save fails the
    /// catalog is put back the way it was, so a failed request never leaves
    /// an unsaved change behind.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Catalog) -> CirculationResult<T>,
    {
        let mut catalog = self.catalog.write().await;
        let previous = catalog.clone();
        let value = op(&mut *catalog)?;

        if let Err(e) = self.persist(&catalog).await {
            *catalog = previous;
            tracing::warn!("Rolled back catalog change after failed save");
            return Err(e);
        }
        Ok(value)
    }

    /// Save the current catalog
    pub async fn save_catalog(&self) -> Result<(), ApiError> {
        let catalog = self.catalog.write().await;
        self.persist(&catalog).await
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
