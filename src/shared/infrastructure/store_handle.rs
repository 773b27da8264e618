use super::document_store::DocumentStore;
use super::memory_store::InMemoryDocumentStore;
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;
use crate::shared::utils::LogContext;
use std::path::PathBuf;
use std::sync::Arc;

/// Process-wide handle to the document store
///
/// Built once at startup and passed explicitly to every repository. When a
/// snapshot path is configured the store is loaded from it on `initialize`
/// and written back on `shutdown`.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store: Arc<InMemoryDocumentStore>,
    snapshot_path: Option<PathBuf>,
}

impl StoreHandle {
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        let store = match &config.snapshot_path {
            Some(path) => InMemoryDocumentStore::load_snapshot(path)?,
            None => {
                log::info!("No snapshot configured, store contents will not outlive the process");
                InMemoryDocumentStore::new()
            }
        };

        Ok(Self {
            store: Arc::new(store),
            snapshot_path: config.snapshot_path.clone(),
        })
    }

    /// The store as the trait object repositories consume
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    pub fn memory_store(&self) -> &Arc<InMemoryDocumentStore> {
        &self.store
    }

    /// Flush the snapshot, if any
    pub fn shutdown(&self) -> AppResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        LogContext::store_operation("snapshot save", "all collections", None);
        let start = std::time::Instant::now();
        self.store.save_snapshot(path)?;
        LogContext::store_operation(
            "snapshot save",
            "all collections",
            Some(start.elapsed().as_millis() as u64),
        );
        Ok(())
    }
}

/// Round-trip the store and report whether it answered
pub async fn check_connection(store: &dyn DocumentStore) -> bool {
    match store.ping().await {
        Ok(()) => {
            log::info!("Document store connection OK");
            true
        }
        Err(e) => {
            log::error!("Document store connection failed: {}", e);
            false
        }
    }
}
