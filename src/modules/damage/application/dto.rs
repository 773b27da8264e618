use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report damage on an item. `severity` is free text parsed as low/medium/high.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDamageReportRequest {
    pub item_id: Uuid,
    pub reported_by: String,
    pub damage_description: String,
    pub severity: String,
}
