/// Document-store implementation of DamageReportRepository
use super::mapper::{field, new_report_fields, report_from_document, DAMAGE_REPORTS_COLLECTION};
use crate::modules::damage::domain::{DamageReport, DamageReportRepository, NewDamageReport};
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::{DocumentStore, SortDirection};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct DamageReportRepositoryImpl {
    store: Arc<dyn DocumentStore>,
}

impl DamageReportRepositoryImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DamageReportRepository for DamageReportRepositoryImpl {
    async fn insert(&self, report: &NewDamageReport) -> AppResult<Uuid> {
        self.store
            .insert_one(DAMAGE_REPORTS_COLLECTION, new_report_fields(report))
            .await
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<DamageReport>> {
        self.store
            .get_by_id(DAMAGE_REPORTS_COLLECTION, *id)
            .await?
            .map(|doc| report_from_document(&doc))
            .transpose()
    }

    async fn get_all(&self) -> AppResult<Vec<DamageReport>> {
        self.store
            .list_ordered(
                DAMAGE_REPORTS_COLLECTION,
                field::REPORT_DATE,
                SortDirection::Descending,
            )
            .await?
            .iter()
            .map(report_from_document)
            .collect()
    }
}
