/// Repository trait for inventory persistence
use super::entities::{InventoryItem, NewInventoryItem};
use crate::shared::domain::Versioned;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn insert(&self, item: &NewInventoryItem) -> AppResult<Uuid>;

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<InventoryItem>>;

    /// Item plus the version stamp needed for a guarded update
    async fn find_versioned(&self, id: &Uuid) -> AppResult<Option<Versioned<InventoryItem>>>;

    /// First non-removed item holding this serial number
    async fn find_active_by_serial(&self, serial_number: &str) -> AppResult<Option<InventoryItem>>;

    /// All items, newest first
    async fn get_all(&self) -> AppResult<Vec<InventoryItem>>;

    /// Persist status and loan count only if the item is still at `expected_version`
    async fn update_if_version(&self, item: &InventoryItem, expected_version: u64)
        -> AppResult<bool>;

    /// Atomically adjust the loan counter, returning the new value
    async fn adjust_loan_count(&self, id: &Uuid, delta: i64) -> AppResult<u32>;
}
