use super::value_objects::{DamageStatus, Severity};
use crate::modules::inventory::domain::InventoryItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageReport {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub item_serial_number: String,
    pub report_date: DateTime<Utc>,
    pub reported_by: String,
    pub damage_description: String,
    pub severity: Severity,
    pub status: DamageStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDamageReport {
    pub item_id: Uuid,
    pub item_name: String,
    pub item_serial_number: String,
    pub report_date: DateTime<Utc>,
    pub reported_by: String,
    pub damage_description: String,
    pub severity: Severity,
    pub status: DamageStatus,
}

impl NewDamageReport {
    /// A pending report against `item`, dated now
    pub fn new(
        item: &InventoryItem,
        reported_by: String,
        damage_description: String,
        severity: Severity,
    ) -> Self {
        Self {
            item_id: item.id,
            item_name: item.name.clone(),
            item_serial_number: item.serial_number.clone(),
            report_date: Utc::now(),
            reported_by,
            damage_description,
            severity,
            status: DamageStatus::Pending,
        }
    }
}
