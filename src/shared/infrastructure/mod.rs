/// Shared infrastructure concerns
///
/// This module contains infrastructure implementations that are shared across
/// multiple bounded contexts (modules).
pub mod document_store;
pub mod memory_store;
pub mod store_handle;

// Re-exports for convenience
pub use document_store::{Document, DocumentStore, FieldValue, Fields, SortDirection};
pub use memory_store::InMemoryDocumentStore;
pub use store_handle::{check_connection, StoreHandle};

#[cfg(test)]
pub use document_store::MockDocumentStore;
