pub mod detailed_stats;
pub mod inventory_summary;

pub use detailed_stats::{
    DetailedStats, GroupStat, ItemSortKey, ItemStat, DEFAULT_MOST_USED_ITEMS, DEFAULT_TOP_GROUPS,
};
pub use inventory_summary::{InventorySummary, RECENT_ACTIVE_LOANS};
