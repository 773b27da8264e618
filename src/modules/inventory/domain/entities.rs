use super::value_objects::ItemStatus;
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub serial_number: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub loan_count: u32,
}

/// Item before the store has assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub name: String,
    pub serial_number: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub loan_count: u32,
}

impl NewInventoryItem {
    pub fn new(name: String, serial_number: String) -> Self {
        Self {
            name,
            serial_number,
            description: None,
            status: ItemStatus::Available,
            created_at: Utc::now(),
            loan_count: 0,
        }
    }

    /// Blank descriptions are stored as absent
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

impl InventoryItem {
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    pub fn is_removed(&self) -> bool {
        self.status == ItemStatus::Removed
    }

    /// Hand the item out: available -> loaned, one more loan on the counter
    pub fn lend(&mut self) -> AppResult<()> {
        if !self.status.can_transition_to(ItemStatus::Loaned) {
            return Err(AppError::ItemNotAvailable(format!(
                "Item '{}' ({}) is {}",
                self.name, self.serial_number, self.status
            )));
        }
        self.status = ItemStatus::Loaned;
        self.loan_count += 1;
        Ok(())
    }

    /// Take the item back: loaned -> available. Returns false if the item was
    /// not out (for instance it was removed while on loan).
    pub fn receive_back(&mut self) -> bool {
        if !self.status.can_transition_to(ItemStatus::Available) {
            return false;
        }
        self.status = ItemStatus::Available;
        true
    }

    /// Soft delete. Returns false if the item was already removed.
    pub fn remove(&mut self) -> bool {
        if self.is_removed() {
            return false;
        }
        self.status = ItemStatus::Removed;
        true
    }

    /// Case-insensitive match on name or serial number
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.serial_number.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(status: ItemStatus) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: "Guitarra".to_string(),
            serial_number: "GTA-001".to_string(),
            description: None,
            status,
            created_at: Utc::now(),
            loan_count: 0,
        }
    }

    #[test]
    fn test_new_item_defaults() {
        let new_item = NewInventoryItem::new("Guitarra".into(), "GTA-001".into())
            .with_description(Some("  ".into()));

        assert_eq!(new_item.status, ItemStatus::Available);
        assert_eq!(new_item.loan_count, 0);
        assert_eq!(new_item.description, None);
    }

    #[test]
    fn test_lend_available_item() {
        let mut guitar = item(ItemStatus::Available);
        guitar.lend().unwrap();

        assert_eq!(guitar.status, ItemStatus::Loaned);
        assert_eq!(guitar.loan_count, 1);
    }

    #[test]
    fn test_lend_rejects_loaned_and_removed() {
        for status in [ItemStatus::Loaned, ItemStatus::Removed] {
            let mut guitar = item(status);
            assert!(matches!(guitar.lend(), Err(AppError::ItemNotAvailable(_))));
            assert_eq!(guitar.status, status);
            assert_eq!(guitar.loan_count, 0);
        }
    }

    #[test]
    fn test_receive_back_only_from_loaned() {
        let mut loaned = item(ItemStatus::Loaned);
        assert!(loaned.receive_back());
        assert_eq!(loaned.status, ItemStatus::Available);

        let mut removed = item(ItemStatus::Removed);
        assert!(!removed.receive_back());
        assert_eq!(removed.status, ItemStatus::Removed);
    }

    #[test]
    fn test_remove_is_terminal() {
        let mut guitar = item(ItemStatus::Loaned);
        assert!(guitar.remove());
        assert!(!guitar.remove());
        assert!(guitar.is_removed());
    }

    #[test]
    fn test_matches_name_or_serial() {
        let guitar = item(ItemStatus::Available);
        assert!(guitar.matches("guit"));
        assert!(guitar.matches("gta-0"));
        assert!(!guitar.matches("tambor"));
    }
}
