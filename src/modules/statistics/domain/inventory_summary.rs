/// Snapshot of what is on the shelf and what is out
use crate::modules::inventory::domain::{InventoryItem, ItemStatus};
use crate::modules::loans::domain::{Loan, LoanStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RECENT_ACTIVE_LOANS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: usize,
    pub available_items: usize,
    pub loaned_items: usize,
    pub active_loans: usize,
    pub returned_loans: usize,
    pub active_loans_by_group: BTreeMap<String, usize>,
    /// Latest loan date first
    pub recent_active_loans: Vec<Loan>,
}

impl InventorySummary {
    pub fn compute(items: &[InventoryItem], loans: &[Loan]) -> Self {
        let count_items = |status: ItemStatus| items.iter().filter(|i| i.status == status).count();

        let mut active: Vec<&Loan> = loans.iter().filter(|l| l.is_active()).collect();
        let mut active_loans_by_group = BTreeMap::new();
        for loan in &active {
            *active_loans_by_group
                .entry(loan.cultural_group.clone())
                .or_insert(0) += 1;
        }

        active.sort_by(|a, b| b.loan_date.cmp(&a.loan_date));

        Self {
            total_items: items.len(),
            available_items: count_items(ItemStatus::Available),
            loaned_items: count_items(ItemStatus::Loaned),
            active_loans: active.len(),
            returned_loans: loans
                .iter()
                .filter(|l| l.status == LoanStatus::Returned)
                .count(),
            active_loans_by_group,
            recent_active_loans: active
                .into_iter()
                .take(RECENT_ACTIVE_LOANS)
                .cloned()
                .collect(),
        }
    }
}
