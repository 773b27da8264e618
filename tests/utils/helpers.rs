/// Test helper functions and service builders
use async_trait::async_trait;
use culturastock_lib::shared::errors::AppResult;
use culturastock_lib::shared::infrastructure::{Document, Fields, SortDirection};
use culturastock_lib::shared::{AppConfig, DocumentStore, InMemoryDocumentStore};
use culturastock_lib::AppState;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryDocumentStore>,
}

/// All services on a fresh in-memory store
pub fn build_test_app() -> TestApp {
    build_test_app_with(AppConfig::default())
}

pub fn build_test_app_with(config: AppConfig) -> TestApp {
    let store = Arc::new(InMemoryDocumentStore::new());
    let state = AppState::with_store(config, store.clone());
    TestApp { state, store }
}

/// All services on a store that yields to the scheduler before every call,
/// so concurrent operations interleave at each store round-trip
pub fn build_interleaving_app() -> AppState {
    let store = Arc::new(YieldingStore {
        inner: InMemoryDocumentStore::new(),
    });
    AppState::with_store(AppConfig::default(), store)
}

pub async fn add_item(app: &AppState, name: &str, serial: &str) -> Uuid {
    app.inventory_service
        .add_item(name.to_string(), serial.to_string(), None)
        .await
        .unwrap()
}

pub struct YieldingStore {
    inner: InMemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for YieldingStore {
    async fn insert_one(&self, collection: &str, fields: Fields) -> AppResult<Uuid> {
        tokio::task::yield_now().await;
        self.inner.insert_one(collection, fields).await
    }

    async fn list_all(&self, collection: &str) -> AppResult<Vec<Document>> {
        tokio::task::yield_now().await;
        self.inner.list_all(collection).await
    }

    async fn list_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> AppResult<Vec<Document>> {
        tokio::task::yield_now().await;
        self.inner.list_ordered(collection, field, direction).await
    }

    async fn get_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Document>> {
        tokio::task::yield_now().await;
        self.inner.get_by_id(collection, id).await
    }

    async fn update_fields(&self, collection: &str, id: Uuid, fields: Fields) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.update_fields(collection, id, fields).await
    }

    async fn update_if_version(
        &self,
        collection: &str,
        id: Uuid,
        expected_version: u64,
        fields: Fields,
    ) -> AppResult<bool> {
        tokio::task::yield_now().await;
        self.inner
            .update_if_version(collection, id, expected_version, fields)
            .await
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.delete_by_id(collection, id).await
    }

    async fn increment(&self, collection: &str, id: Uuid, field: &str, delta: i64) -> AppResult<i64> {
        tokio::task::yield_now().await;
        self.inner.increment(collection, id, field, delta).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }
}
