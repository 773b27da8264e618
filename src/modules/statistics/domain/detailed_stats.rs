/// Usage aggregate over items, loans and damage reports
use crate::modules::damage::domain::DamageReport;
use crate::modules::inventory::domain::{InventoryItem, ItemStatus};
use crate::modules::loans::domain::{Loan, LoanStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

pub const DEFAULT_TOP_GROUPS: usize = 10;
pub const DEFAULT_MOST_USED_ITEMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub id: Uuid,
    pub name: String,
    pub serial_number: String,
    pub total_loans: usize,
    pub active_loans: usize,
    pub returned_loans: usize,
    pub damage_reports: usize,
    pub last_loan_date: Option<DateTime<Utc>>,
    pub status: ItemStatus,
}

impl ItemStat {
    fn new(item: &InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            serial_number: item.serial_number.clone(),
            total_loans: 0,
            active_loans: 0,
            returned_loans: 0,
            damage_reports: 0,
            last_loan_date: None,
            status: item.status,
        }
    }

    /// On the shelf or currently out
    pub fn is_in_use(&self) -> bool {
        self.status == ItemStatus::Available || self.active_loans > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStat {
    pub total_loans: usize,
    pub active_loans: usize,
    pub returned_loans: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSortKey {
    TotalLoans,
    DamageReports,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStats {
    /// Most loaned first
    pub item_stats: Vec<ItemStat>,
    pub group_stats: BTreeMap<String, GroupStat>,
    pub total_items: usize,
    pub total_loans: usize,
    pub active_loans: usize,
    pub total_damage_reports: usize,
}

impl DetailedStats {
    /// Aggregate a full snapshot of the store.
    ///
    /// `loans` must be in the store's natural scan order: an item's
    /// `last_loan_date` is the date of the first of its loans met in that
    /// order, which is not necessarily the latest one.
    pub fn compute(items: &[InventoryItem], loans: &[Loan], reports: &[DamageReport]) -> Self {
        let mut item_stats: Vec<ItemStat> = items.iter().map(ItemStat::new).collect();
        let index: HashMap<Uuid, usize> = item_stats
            .iter()
            .enumerate()
            .map(|(i, stat)| (stat.id, i))
            .collect();

        let mut group_stats: BTreeMap<String, GroupStat> = BTreeMap::new();
        let mut active_loans = 0;

        for loan in loans {
            let returned = loan.status == LoanStatus::Returned;
            if !returned {
                active_loans += 1;
            }

            if let Some(&i) = index.get(&loan.item.item_id) {
                let stat = &mut item_stats[i];
                stat.total_loans += 1;
                if returned {
                    stat.returned_loans += 1;
                } else {
                    stat.active_loans += 1;
                }
                if stat.last_loan_date.is_none() {
                    stat.last_loan_date = Some(loan.loan_date);
                }
            }

            let group = group_stats.entry(loan.cultural_group.clone()).or_default();
            group.total_loans += 1;
            if returned {
                group.returned_loans += 1;
            } else {
                group.active_loans += 1;
            }
        }

        for report in reports {
            if let Some(&i) = index.get(&report.item_id) {
                item_stats[i].damage_reports += 1;
            }
        }

        item_stats.sort_by(|a, b| b.total_loans.cmp(&a.total_loans));

        Self {
            item_stats,
            group_stats,
            total_items: items.len(),
            total_loans: loans.len(),
            active_loans,
            total_damage_reports: reports.len(),
        }
    }

    pub fn sorted_items(&self, key: ItemSortKey) -> Vec<&ItemStat> {
        let mut sorted: Vec<&ItemStat> = self.item_stats.iter().collect();
        match key {
            ItemSortKey::TotalLoans => sorted.sort_by(|a, b| b.total_loans.cmp(&a.total_loans)),
            ItemSortKey::DamageReports => {
                sorted.sort_by(|a, b| b.damage_reports.cmp(&a.damage_reports))
            }
            ItemSortKey::Name => {
                sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
        sorted
    }

    /// Items that are available or have a loan open; removed and idle items drop out
    pub fn only_active(&self) -> Vec<&ItemStat> {
        self.item_stats.iter().filter(|s| s.is_in_use()).collect()
    }

    /// Groups with the most loans
    pub fn top_groups(&self, n: usize) -> Vec<(&str, &GroupStat)> {
        let mut groups: Vec<(&str, &GroupStat)> = self
            .group_stats
            .iter()
            .map(|(name, stat)| (name.as_str(), stat))
            .collect();
        groups.sort_by(|a, b| b.1.total_loans.cmp(&a.1.total_loans));
        groups.truncate(n);
        groups
    }

    pub fn most_used_items(&self, n: usize) -> Vec<&ItemStat> {
        self.item_stats
            .iter()
            .filter(|s| s.total_loans > 0)
            .take(n)
            .collect()
    }

    /// Items with at least one report, most reported first
    pub fn items_with_damage(&self) -> Vec<&ItemStat> {
        let mut damaged: Vec<&ItemStat> = self
            .item_stats
            .iter()
            .filter(|s| s.damage_reports > 0)
            .collect();
        damaged.sort_by(|a, b| b.damage_reports.cmp(&a.damage_reports));
        damaged
    }
}
