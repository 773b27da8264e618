use super::value_objects::LoanStatus;
use crate::modules::inventory::domain::InventoryItem;
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
}

impl Borrower {
    pub fn new(name: String, document: String, phone: String, email: String) -> Self {
        Self {
            name,
            document,
            phone,
            email,
        }
    }
}

/// Item details copied onto the loan when it is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanedItem {
    pub item_id: Uuid,
    pub item_name: String,
    pub item_serial_number: String,
}

impl From<&InventoryItem> for LoanedItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            item_id: item.id,
            item_name: item.name.clone(),
            item_serial_number: item.serial_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Uuid,
    pub borrower: Borrower,
    pub cultural_group: String,
    pub item: LoanedItem,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub borrower: Borrower,
    pub cultural_group: String,
    pub item: LoanedItem,
    pub loan_date: DateTime<Utc>,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl NewLoan {
    pub fn new(
        borrower: Borrower,
        cultural_group: String,
        item: &InventoryItem,
        loan_date: DateTime<Utc>,
    ) -> Self {
        Self {
            borrower,
            cultural_group,
            item: LoanedItem::from(item),
            loan_date,
            status: LoanStatus::Active,
            created_at: Utc::now(),
        }
    }
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    pub fn mark_returned(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        if !self.is_active() {
            return Err(AppError::AlreadyReturned(format!(
                "Loan {} of '{}' was already returned",
                self.id, self.item.item_name
            )));
        }
        self.status = LoanStatus::Returned;
        self.return_date = Some(at);
        Ok(())
    }

    /// Back to active with no return date; false if it already was
    pub fn reopen(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.status = LoanStatus::Active;
        self.return_date = None;
        true
    }

    /// Borrower name, item name, serial and email match ignoring case;
    /// the document number must match exactly.
    pub fn matches(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.borrower.name.to_lowercase().contains(&lowered)
            || self.item.item_name.to_lowercase().contains(&lowered)
            || self.item.item_serial_number.to_lowercase().contains(&lowered)
            || self.borrower.document.contains(term)
            || self.borrower.email.to_lowercase().contains(&lowered)
    }
}
