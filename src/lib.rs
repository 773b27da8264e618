pub mod modules;
pub mod shared;

use modules::{
    damage::{DamageReportRepository, DamageReportRepositoryImpl, DamageReportService},
    inventory::{InventoryRepository, InventoryRepositoryImpl, InventoryService},
    loans::{LoanPolicy, LoanRepository, LoanRepositoryImpl, LoanService},
    statistics::StatisticsService,
};
use shared::errors::AppResult;
use shared::infrastructure::check_connection;
use shared::utils::init_logger;
use shared::{AppConfig, DocumentStore, StoreHandle};
use std::sync::Arc;

/// Services wired against one document store
pub struct AppState {
    pub config: AppConfig,
    store_handle: Option<StoreHandle>,
    store: Arc<dyn DocumentStore>,
    pub inventory_service: Arc<InventoryService>,
    pub loan_service: Arc<LoanService>,
    pub damage_service: Arc<DamageReportService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    /// Open the store described by `config` and build every service on top of it
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        let handle = StoreHandle::initialize(&config)?;
        let store = handle.store();
        let mut state = Self::with_store(config, store);
        state.store_handle = Some(handle);
        Ok(state)
    }

    /// Build the services on an existing store. Nothing is flushed on shutdown.
    pub fn with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let inventory_repo: Arc<dyn InventoryRepository> =
            Arc::new(InventoryRepositoryImpl::new(Arc::clone(&store)));
        let loan_repo: Arc<dyn LoanRepository> =
            Arc::new(LoanRepositoryImpl::new(Arc::clone(&store)));
        let report_repo: Arc<dyn DamageReportRepository> =
            Arc::new(DamageReportRepositoryImpl::new(Arc::clone(&store)));

        let inventory_service = Arc::new(InventoryService::new(
            Arc::clone(&inventory_repo),
            config.max_cas_retries,
        ));
        let loan_service = Arc::new(LoanService::new(
            Arc::clone(&loan_repo),
            Arc::clone(&inventory_repo),
            LoanPolicy::from_config(&config),
        ));
        let damage_service = Arc::new(DamageReportService::new(
            Arc::clone(&report_repo),
            Arc::clone(&inventory_repo),
        ));
        let statistics_service = Arc::new(StatisticsService::new(
            inventory_repo,
            loan_repo,
            report_repo,
        ));

        Self {
            config,
            store_handle: None,
            store,
            inventory_service,
            loan_service,
            damage_service,
            statistics_service,
        }
    }

    pub async fn check_store_connection(&self) -> bool {
        check_connection(self.store.as_ref()).await
    }

    /// Flush the store snapshot, if this state owns one
    pub fn shutdown(&self) -> AppResult<()> {
        match &self.store_handle {
            Some(handle) => {
                handle.shutdown()?;
                log::info!("Store snapshot flushed");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Start up, report the current state of the inventory and shut down
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logger(config.log_level);

    let state = AppState::initialize(config)?;
    if !state.check_store_connection().await {
        anyhow::bail!("Document store is unavailable");
    }

    let summary = state.statistics_service.inventory_summary().await?;
    log::info!(
        "Inventory: {} items ({} available, {} loaned), {} active loans, {} returned",
        summary.total_items,
        summary.available_items,
        summary.loaned_items,
        summary.active_loans,
        summary.returned_loans
    );
    for (group, count) in &summary.active_loans_by_group {
        log::info!("  {}: {} active loans", group, count);
    }

    state.shutdown()?;
    Ok(())
}
