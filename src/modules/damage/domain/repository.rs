/// Repository trait for damage report persistence
use super::entities::{DamageReport, NewDamageReport};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait DamageReportRepository: Send + Sync {
    async fn insert(&self, report: &NewDamageReport) -> AppResult<Uuid>;

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<DamageReport>>;

    /// All reports, most recent first
    async fn get_all(&self) -> AppResult<Vec<DamageReport>>;
}
