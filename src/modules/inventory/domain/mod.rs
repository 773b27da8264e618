pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{InventoryItem, NewInventoryItem};
pub use repository::InventoryRepository;
pub use value_objects::ItemStatus;
