use crate::modules::inventory::domain::{InventoryItem, InventoryRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;
use uuid::Uuid;

/// Read-modify-write an item guarded by its version stamp.
///
/// `apply` returns false when there is nothing to change, which yields
/// `Ok(None)`. A lost race re-reads and re-applies, up to `max_retries` times.
/// Every status change on an item goes through here so that no writer can
/// overwrite a loan count it did not read.
pub async fn update_item_guarded<F>(
    repo: &dyn InventoryRepository,
    id: &Uuid,
    max_retries: u32,
    mut apply: F,
) -> AppResult<Option<InventoryItem>>
where
    F: FnMut(&mut InventoryItem) -> AppResult<bool> + Send,
{
    for attempt in 0..=max_retries {
        let current = repo
            .find_versioned(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item with ID {} not found", id)))?;
        let version = current.version;
        let mut item = current.into_inner();

        if !apply(&mut item)? {
            return Ok(None);
        }
        if repo.update_if_version(&item, version).await? {
            return Ok(Some(item));
        }
        log_debug!("Item {} changed concurrently (attempt {})", id, attempt + 1);
    }

    Err(AppError::Conflict(format!(
        "Item {} kept changing while being updated",
        id
    )))
}
