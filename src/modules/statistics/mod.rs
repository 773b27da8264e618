/// Statistics bounded context
///
/// Derived, never persisted: usage per item and per cultural group, plus the
/// inventory summary shown on the reports page.
pub mod application;
pub mod domain;

pub use application::StatisticsService;
pub use domain::{DetailedStats, GroupStat, InventorySummary, ItemSortKey, ItemStat};
