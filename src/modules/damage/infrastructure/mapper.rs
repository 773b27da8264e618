/// Mapping between damage reports and store documents
use crate::fields;
use crate::modules::damage::domain::{DamageReport, DamageStatus, NewDamageReport, Severity};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::{Document, Fields};
use uuid::Uuid;

pub const DAMAGE_REPORTS_COLLECTION: &str = "damageReports";

pub mod field {
    pub const ITEM_ID: &str = "itemId";
    pub const ITEM_NAME: &str = "itemName";
    pub const ITEM_SERIAL_NUMBER: &str = "itemSerialNumber";
    pub const REPORT_DATE: &str = "reportDate";
    pub const REPORTED_BY: &str = "reportedBy";
    pub const DAMAGE_DESCRIPTION: &str = "damageDescription";
    pub const SEVERITY: &str = "severity";
    pub const STATUS: &str = "status";
}

pub fn new_report_fields(report: &NewDamageReport) -> Fields {
    fields! {
        field::ITEM_ID => report.item_id.to_string(),
        field::ITEM_NAME => report.item_name.as_str(),
        field::ITEM_SERIAL_NUMBER => report.item_serial_number.as_str(),
        field::REPORT_DATE => report.report_date,
        field::REPORTED_BY => report.reported_by.as_str(),
        field::DAMAGE_DESCRIPTION => report.damage_description.as_str(),
        field::SEVERITY => report.severity.as_str(),
        field::STATUS => report.status.as_str(),
    }
}

pub fn report_from_document(doc: &Document) -> AppResult<DamageReport> {
    let severity: Severity = doc
        .text(field::SEVERITY)?
        .parse()
        .map_err(AppError::SerializationError)?;
    let status: DamageStatus = doc
        .text(field::STATUS)?
        .parse()
        .map_err(AppError::SerializationError)?;
    let item_id = doc.text(field::ITEM_ID)?.parse::<Uuid>().map_err(|e| {
        AppError::SerializationError(format!(
            "Damage report {} has an invalid item id: {}",
            doc.id, e
        ))
    })?;

    Ok(DamageReport {
        id: doc.id,
        item_id,
        item_name: doc.text(field::ITEM_NAME)?,
        item_serial_number: doc.text(field::ITEM_SERIAL_NUMBER)?,
        report_date: doc.timestamp(field::REPORT_DATE)?,
        reported_by: doc.text(field::REPORTED_BY)?,
        damage_description: doc.text(field::DAMAGE_DESCRIPTION)?,
        severity,
        status,
    })
}
