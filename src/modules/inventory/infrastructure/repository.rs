/// Document-store implementation of InventoryRepository
use super::mapper::{
    field, item_from_document, loan_count_from, new_item_fields, state_fields,
    versioned_item_from_document, INVENTORY_COLLECTION,
};
use crate::modules::inventory::domain::{InventoryItem, InventoryRepository, NewInventoryItem};
use crate::shared::domain::Versioned;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::{DocumentStore, SortDirection};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct InventoryRepositoryImpl {
    store: Arc<dyn DocumentStore>,
}

impl InventoryRepositoryImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl InventoryRepository for InventoryRepositoryImpl {
    async fn insert(&self, item: &NewInventoryItem) -> AppResult<Uuid> {
        self.store
            .insert_one(INVENTORY_COLLECTION, new_item_fields(item))
            .await
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<InventoryItem>> {
        self.store
            .get_by_id(INVENTORY_COLLECTION, *id)
            .await?
            .map(|doc| item_from_document(&doc))
            .transpose()
    }

    async fn find_versioned(&self, id: &Uuid) -> AppResult<Option<Versioned<InventoryItem>>> {
        self.store
            .get_by_id(INVENTORY_COLLECTION, *id)
            .await?
            .map(|doc| versioned_item_from_document(&doc))
            .transpose()
    }

    async fn find_active_by_serial(&self, serial_number: &str) -> AppResult<Option<InventoryItem>> {
        // The store has no secondary indexes; scan and filter
        let items = self.get_all().await?;
        Ok(items
            .into_iter()
            .find(|item| !item.is_removed() && item.serial_number == serial_number))
    }

    async fn get_all(&self) -> AppResult<Vec<InventoryItem>> {
        self.store
            .list_ordered(INVENTORY_COLLECTION, field::CREATED_AT, SortDirection::Descending)
            .await?
            .iter()
            .map(item_from_document)
            .collect()
    }

    async fn update_if_version(
        &self,
        item: &InventoryItem,
        expected_version: u64,
    ) -> AppResult<bool> {
        self.store
            .update_if_version(
                INVENTORY_COLLECTION,
                item.id,
                expected_version,
                state_fields(item),
            )
            .await
    }

    async fn adjust_loan_count(&self, id: &Uuid, delta: i64) -> AppResult<u32> {
        let raw = self
            .store
            .increment(INVENTORY_COLLECTION, *id, field::LOAN_COUNT, delta)
            .await?;
        loan_count_from(raw)
    }
}
