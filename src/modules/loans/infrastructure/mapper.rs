/// Mapping between loan entities and store documents
///
/// Loans are stored flat: borrower and item fields sit next to each other at
/// the top level of the document.
use crate::fields;
use crate::modules::loans::domain::{Borrower, Loan, LoanStatus, LoanedItem, NewLoan};
use crate::shared::domain::Versioned;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::{Document, Fields};
use uuid::Uuid;

pub const LOANS_COLLECTION: &str = "loans";

pub mod field {
    pub const BORROWER_NAME: &str = "borrowerName";
    pub const BORROWER_DOCUMENT: &str = "borrowerDocument";
    pub const BORROWER_PHONE: &str = "borrowerPhone";
    pub const BORROWER_EMAIL: &str = "borrowerEmail";
    pub const CULTURAL_GROUP: &str = "culturalGroup";
    pub const ITEM_ID: &str = "itemId";
    pub const ITEM_NAME: &str = "itemName";
    pub const ITEM_SERIAL_NUMBER: &str = "itemSerialNumber";
    pub const LOAN_DATE: &str = "loanDate";
    pub const RETURN_DATE: &str = "returnDate";
    pub const STATUS: &str = "status";
    pub const CREATED_AT: &str = "createdAt";
}

pub fn new_loan_fields(loan: &NewLoan) -> Fields {
    fields! {
        field::BORROWER_NAME => loan.borrower.name.as_str(),
        field::BORROWER_DOCUMENT => loan.borrower.document.as_str(),
        field::BORROWER_PHONE => loan.borrower.phone.as_str(),
        field::BORROWER_EMAIL => loan.borrower.email.as_str(),
        field::CULTURAL_GROUP => loan.cultural_group.as_str(),
        field::ITEM_ID => loan.item.item_id.to_string(),
        field::ITEM_NAME => loan.item.item_name.as_str(),
        field::ITEM_SERIAL_NUMBER => loan.item.item_serial_number.as_str(),
        field::LOAN_DATE => loan.loan_date,
        field::STATUS => loan.status.as_str(),
        field::CREATED_AT => loan.created_at,
    }
}

/// The mutable part of a loan
pub fn state_fields(loan: &Loan) -> Fields {
    fields! {
        field::STATUS => loan.status.as_str(),
        field::RETURN_DATE => loan.return_date,
    }
}

pub fn loan_from_document(doc: &Document) -> AppResult<Loan> {
    let status: LoanStatus = doc
        .text(field::STATUS)?
        .parse()
        .map_err(AppError::SerializationError)?;
    let item_id = doc.text(field::ITEM_ID)?.parse::<Uuid>().map_err(|e| {
        AppError::SerializationError(format!("Loan {} has an invalid item id: {}", doc.id, e))
    })?;

    Ok(Loan {
        id: doc.id,
        borrower: Borrower {
            name: doc.text(field::BORROWER_NAME)?,
            document: doc.text(field::BORROWER_DOCUMENT)?,
            phone: doc.text(field::BORROWER_PHONE)?,
            email: doc.text(field::BORROWER_EMAIL)?,
        },
        cultural_group: doc.text(field::CULTURAL_GROUP)?,
        item: LoanedItem {
            item_id,
            item_name: doc.text(field::ITEM_NAME)?,
            item_serial_number: doc.text(field::ITEM_SERIAL_NUMBER)?,
        },
        loan_date: doc.timestamp(field::LOAN_DATE)?,
        return_date: doc.optional_timestamp(field::RETURN_DATE)?,
        status,
    })
}

pub fn versioned_loan_from_document(doc: &Document) -> AppResult<Versioned<Loan>> {
    Ok(Versioned::new(loan_from_document(doc)?, doc.version))
}
