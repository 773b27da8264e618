pub mod guarded;
pub mod service;

pub use guarded::update_item_guarded;
pub use service::InventoryService;
