// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod config;          // Process-wide configuration
pub mod domain;          // Shared domain concepts
pub mod errors;          // Shared error types
pub mod infrastructure;  // Shared infrastructure (document store)
pub mod utils;           // Shared utilities

// Re-exports for convenience
pub use config::AppConfig;
pub use infrastructure::{DocumentStore, InMemoryDocumentStore, StoreHandle};
