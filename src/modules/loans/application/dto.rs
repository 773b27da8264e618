use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lend an item to a borrower on behalf of a cultural group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    pub borrower_name: String,
    pub borrower_document: String,
    pub borrower_phone: String,
    pub borrower_email: String,
    pub cultural_group: String,
    pub item_id: Uuid,
    pub loan_date: DateTime<Utc>,
}
