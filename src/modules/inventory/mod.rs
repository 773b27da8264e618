/// Inventory bounded context
///
/// Items of cultural equipment, tracked by serial number, and the status
/// rules that gate lending.
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::InventoryService;
pub use domain::{InventoryItem, InventoryRepository, ItemStatus, NewInventoryItem};
pub use infrastructure::InventoryRepositoryImpl;
