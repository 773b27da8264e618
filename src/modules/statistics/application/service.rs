use crate::modules::damage::domain::DamageReportRepository;
use crate::modules::inventory::domain::InventoryRepository;
use crate::modules::loans::domain::LoanRepository;
use crate::modules::statistics::domain::{DetailedStats, InventorySummary};
use crate::shared::errors::AppResult;
use crate::shared::utils::TimedOperation;
use std::sync::Arc;

/// Read-only reporting over the other contexts
pub struct StatisticsService {
    inventory_repo: Arc<dyn InventoryRepository>,
    loan_repo: Arc<dyn LoanRepository>,
    report_repo: Arc<dyn DamageReportRepository>,
}

impl StatisticsService {
    pub fn new(
        inventory_repo: Arc<dyn InventoryRepository>,
        loan_repo: Arc<dyn LoanRepository>,
        report_repo: Arc<dyn DamageReportRepository>,
    ) -> Self {
        Self {
            inventory_repo,
            loan_repo,
            report_repo,
        }
    }

    pub async fn compute_detailed_stats(&self) -> AppResult<DetailedStats> {
        let timer = TimedOperation::new("compute_detailed_stats");

        let (items, loans, reports) = futures::try_join!(
            self.inventory_repo.get_all(),
            self.loan_repo.get_all_unordered(),
            self.report_repo.get_all(),
        )?;
        let stats = DetailedStats::compute(&items, &loans, &reports);

        timer.finish_with_info(&format!(
            "{} items, {} loans, {} damage reports",
            stats.total_items, stats.total_loans, stats.total_damage_reports
        ));
        Ok(stats)
    }

    pub async fn inventory_summary(&self) -> AppResult<InventorySummary> {
        let timer = TimedOperation::new("inventory_summary");

        let (items, loans) =
            futures::try_join!(self.inventory_repo.get_all(), self.loan_repo.get_all())?;
        let summary = InventorySummary::compute(&items, &loans);

        timer.finish();
        Ok(summary)
    }
}
