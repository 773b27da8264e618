use super::dto::CreateDamageReportRequest;
use crate::modules::damage::domain::{
    DamageReport, DamageReportRepository, NewDamageReport, Severity,
};
use crate::modules::inventory::domain::InventoryRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::log_info;
use std::sync::Arc;
use uuid::Uuid;

pub struct DamageReportService {
    report_repo: Arc<dyn DamageReportRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl DamageReportService {
    pub fn new(
        report_repo: Arc<dyn DamageReportRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self {
            report_repo,
            inventory_repo,
        }
    }

    /// File a pending report. The item's status is left alone.
    pub async fn create_report(&self, request: CreateDamageReportRequest) -> AppResult<Uuid> {
        Validator::require_all(&[
            ("Reported by", request.reported_by.as_str()),
            ("Damage description", request.damage_description.as_str()),
            ("Severity", request.severity.as_str()),
        ])?;
        let severity: Severity = request
            .severity
            .parse()
            .map_err(AppError::ValidationError)?;

        let item = self
            .inventory_repo
            .find_by_id(&request.item_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Item with ID {} not found", request.item_id))
            })?;

        let report = NewDamageReport::new(
            &item,
            request.reported_by,
            request.damage_description,
            severity,
        );
        let id = self.report_repo.insert(&report).await?;

        log_info!(
            "Damage report {} ({}) filed for '{}' ({}) by {}",
            id,
            severity,
            item.name,
            item.serial_number,
            report.reported_by
        );
        Ok(id)
    }

    /// All reports, most recent first
    pub async fn list_reports(&self) -> AppResult<Vec<DamageReport>> {
        self.report_repo.get_all().await
    }

    pub async fn list_reports_for_item(&self, item_id: &Uuid) -> AppResult<Vec<DamageReport>> {
        let reports = self.list_reports().await?;
        Ok(reports
            .into_iter()
            .filter(|r| r.item_id == *item_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::damage::domain::DamageStatus;
    use crate::modules::damage::infrastructure::DamageReportRepositoryImpl;
    use crate::modules::inventory::domain::{ItemStatus, NewInventoryItem};
    use crate::modules::inventory::infrastructure::InventoryRepositoryImpl;
    use crate::shared::infrastructure::{DocumentStore, InMemoryDocumentStore};

    struct Fixture {
        service: DamageReportService,
        inventory_repo: Arc<InventoryRepositoryImpl>,
    }

    fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        let inventory_repo = Arc::new(InventoryRepositoryImpl::new(store.clone()));
        let report_repo = Arc::new(DamageReportRepositoryImpl::new(store));
        Fixture {
            service: DamageReportService::new(report_repo, inventory_repo.clone()),
            inventory_repo,
        }
    }

    fn request(item_id: Uuid, severity: &str) -> CreateDamageReportRequest {
        CreateDamageReportRequest {
            item_id,
            reported_by: "Luis".into(),
            damage_description: "Cuerda rota".into(),
            severity: severity.into(),
        }
    }

    #[tokio::test]
    async fn test_create_report_leaves_item_untouched() {
        let f = fixture();
        let item_id = f
            .inventory_repo
            .insert(&NewInventoryItem::new("Guitarra".into(), "GTA-001".into()))
            .await
            .unwrap();

        let id = f.service.create_report(request(item_id, "medium")).await.unwrap();

        let reports = f.service.list_reports().await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, id);
        assert_eq!(reports[0].item_name, "Guitarra");
        assert_eq!(reports[0].severity, Severity::Medium);
        assert_eq!(reports[0].status, DamageStatus::Pending);

        let item = f.inventory_repo.find_by_id(&item_id).await.unwrap().unwrap();
        assert_eq!(item.status, ItemStatus::Available);
    }

    #[tokio::test]
    async fn test_create_report_rejections() {
        let f = fixture();
        let item_id = f
            .inventory_repo
            .insert(&NewInventoryItem::new("Guitarra".into(), "GTA-001".into()))
            .await
            .unwrap();

        let bad_severity = f.service.create_report(request(item_id, "critical")).await;
        assert!(matches!(bad_severity, Err(AppError::ValidationError(_))));

        let mut blank = request(item_id, "low");
        blank.reported_by = "".into();
        assert!(matches!(
            f.service.create_report(blank).await,
            Err(AppError::ValidationError(_))
        ));

        let missing = f.service.create_report(request(Uuid::new_v4(), "low")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        assert!(f.service.list_reports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_reports_for_item() {
        let f = fixture();
        let guitar = f
            .inventory_repo
            .insert(&NewInventoryItem::new("Guitarra".into(), "GTA-001".into()))
            .await
            .unwrap();
        let drum = f
            .inventory_repo
            .insert(&NewInventoryItem::new("Tambor".into(), "TMB-001".into()))
            .await
            .unwrap();

        f.service.create_report(request(guitar, "low")).await.unwrap();
        f.service.create_report(request(guitar, "high")).await.unwrap();
        f.service.create_report(request(drum, "low")).await.unwrap();

        assert_eq!(f.service.list_reports_for_item(&guitar).await.unwrap().len(), 2);
        assert_eq!(f.service.list_reports_for_item(&drum).await.unwrap().len(), 1);
    }
}
