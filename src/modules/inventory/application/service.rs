use super::super::domain::{InventoryItem, InventoryRepository, NewInventoryItem};
use super::guarded::update_item_guarded;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, Validator};
use crate::{log_debug, log_info};
use std::sync::Arc;
use uuid::Uuid;

pub struct InventoryService {
    inventory_repo: Arc<dyn InventoryRepository>,
    max_cas_retries: u32,
}

impl InventoryService {
    pub fn new(inventory_repo: Arc<dyn InventoryRepository>, max_cas_retries: u32) -> Self {
        Self {
            inventory_repo,
            max_cas_retries,
        }
    }

    pub async fn add_item(
        &self,
        name: String,
        serial_number: String,
        description: Option<String>,
    ) -> AppResult<Uuid> {
        Validator::require("Name", &name)?;
        Validator::require("Serial number", &serial_number)?;

        // Serial numbers are unique among items that have not been removed
        if let Some(existing) = self
            .inventory_repo
            .find_active_by_serial(&serial_number)
            .await?
        {
            return Err(AppError::DuplicateSerialNumber(format!(
                "Serial number '{}' is already used by '{}'",
                serial_number, existing.name
            )));
        }

        let item = NewInventoryItem::new(name, serial_number).with_description(description);
        let id = self.inventory_repo.insert(&item).await?;

        log_info!(
            "Added item {} '{}' ({}) to inventory",
            id,
            item.name,
            item.serial_number
        );
        Ok(id)
    }

    /// Soft delete: the item stays in the store with status `removed`.
    ///
    /// Version-guarded like every other item write, so a loan claimed while
    /// the removal is in flight keeps its loan count.
    pub async fn remove_item(&self, id: &Uuid) -> AppResult<()> {
        let removed = update_item_guarded(
            self.inventory_repo.as_ref(),
            id,
            self.max_cas_retries,
            |item| Ok(item.remove()),
        )
        .await?;

        match removed {
            Some(item) => log_info!("Removed item {} '{}' from inventory", id, item.name),
            None => log_debug!("Item {} was already removed", id),
        }
        Ok(())
    }

    pub async fn get_item(&self, id: &Uuid) -> AppResult<InventoryItem> {
        self.inventory_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with ID {} not found", id)))
    }

    /// All items, newest first
    pub async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        self.inventory_repo.get_all().await
    }

    /// Items whose name or serial number contains `term`, ignoring case
    pub async fn search_inventory(&self, term: &str) -> AppResult<Vec<InventoryItem>> {
        let items = self.list_inventory().await?;
        let found: Vec<InventoryItem> = items.into_iter().filter(|i| i.matches(term)).collect();

        LogContext::search_operation("inventory", term, Some(found.len()));
        Ok(found)
    }

    /// Items that can be lent right now, optionally narrowed by `term`
    pub async fn list_available_items(&self, term: &str) -> AppResult<Vec<InventoryItem>> {
        let items = self.list_inventory().await?;
        Ok(items
            .into_iter()
            .filter(|i| i.is_available() && i.matches(term))
            .collect())
    }
}
