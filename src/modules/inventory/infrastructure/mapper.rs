/// Mapping between inventory entities and store documents
use crate::fields;
use crate::modules::inventory::domain::{InventoryItem, ItemStatus, NewInventoryItem};
use crate::shared::domain::Versioned;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::{Document, Fields};

pub const INVENTORY_COLLECTION: &str = "inventory";

pub mod field {
    pub const NAME: &str = "name";
    pub const SERIAL_NUMBER: &str = "serialNumber";
    pub const DESCRIPTION: &str = "description";
    pub const STATUS: &str = "status";
    pub const CREATED_AT: &str = "createdAt";
    pub const LOAN_COUNT: &str = "loanCount";
}

pub fn new_item_fields(item: &NewInventoryItem) -> Fields {
    fields! {
        field::NAME => item.name.as_str(),
        field::SERIAL_NUMBER => item.serial_number.as_str(),
        field::DESCRIPTION => item.description.clone(),
        field::STATUS => item.status.as_str(),
        field::CREATED_AT => item.created_at,
        field::LOAN_COUNT => i64::from(item.loan_count),
    }
}

/// The mutable part of an item
pub fn state_fields(item: &InventoryItem) -> Fields {
    fields! {
        field::STATUS => item.status.as_str(),
        field::LOAN_COUNT => i64::from(item.loan_count),
    }
}

pub fn loan_count_from(raw: i64) -> AppResult<u32> {
    u32::try_from(raw).map_err(|_| {
        AppError::SerializationError(format!("Loan count {} is out of range", raw))
    })
}

pub fn item_from_document(doc: &Document) -> AppResult<InventoryItem> {
    let status: ItemStatus = doc
        .text(field::STATUS)?
        .parse()
        .map_err(AppError::SerializationError)?;

    Ok(InventoryItem {
        id: doc.id,
        name: doc.text(field::NAME)?,
        serial_number: doc.text(field::SERIAL_NUMBER)?,
        description: doc.optional_text(field::DESCRIPTION)?,
        status,
        created_at: doc.timestamp(field::CREATED_AT)?,
        loan_count: loan_count_from(doc.integer_or_zero(field::LOAN_COUNT)?)?,
    })
}

pub fn versioned_item_from_document(doc: &Document) -> AppResult<Versioned<InventoryItem>> {
    Ok(Versioned::new(item_from_document(doc)?, doc.version))
}
