/// Value objects for the inventory domain
use serde::{Deserialize, Serialize};

/// Lifecycle status of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Loaned,
    Removed,
}

impl ItemStatus {
    /// Transition table: available <-> loaned, anything -> removed, removed is terminal.
    pub fn can_transition_to(self, next: ItemStatus) -> bool {
        matches!(
            (self, next),
            (ItemStatus::Available, ItemStatus::Loaned)
                | (ItemStatus::Loaned, ItemStatus::Available)
                | (ItemStatus::Available, ItemStatus::Removed)
                | (ItemStatus::Loaned, ItemStatus::Removed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Loaned => "loaned",
            ItemStatus::Removed => "removed",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(ItemStatus::Available),
            "loaned" => Ok(ItemStatus::Loaned),
            "removed" => Ok(ItemStatus::Removed),
            _ => Err(format!("Invalid item status: {}", s)),
        }
    }
}
