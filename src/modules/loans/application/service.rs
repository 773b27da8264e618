use super::dto::CreateLoanRequest;
use crate::modules::inventory::application::update_item_guarded;
use crate::modules::inventory::domain::{InventoryItem, InventoryRepository};
use crate::modules::loans::domain::{
    Borrower, BorrowerDirectory, BorrowerSuggestion, Loan, LoanRepository, NewLoan,
};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, Validator};
use crate::{log_debug, log_error, log_info, log_warn};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Rules applied when lending
#[derive(Debug, Clone)]
pub struct LoanPolicy {
    pub known_cultural_groups: Vec<String>,
    pub suggestion_limit: usize,
    pub max_cas_retries: u32,
}

impl LoanPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            known_cultural_groups: config.cultural_groups.clone(),
            suggestion_limit: config.suggestion_limit,
            max_cas_retries: config.max_cas_retries,
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

pub struct LoanService {
    loan_repo: Arc<dyn LoanRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
    policy: LoanPolicy,
}

impl LoanService {
    pub fn new(
        loan_repo: Arc<dyn LoanRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
        policy: LoanPolicy,
    ) -> Self {
        Self {
            loan_repo,
            inventory_repo,
            policy,
        }
    }

    /// Lend an available item and record the loan.
    ///
    /// The item is claimed first with a version-guarded update, so two
    /// concurrent requests for the same item cannot both succeed. If the loan
    /// record cannot be written afterwards the claim is rolled back.
    pub async fn create_loan(&self, request: CreateLoanRequest) -> AppResult<Uuid> {
        Validator::require_all(&[
            ("Borrower name", request.borrower_name.as_str()),
            ("Borrower document", request.borrower_document.as_str()),
            ("Borrower phone", request.borrower_phone.as_str()),
            ("Borrower email", request.borrower_email.as_str()),
        ])?;
        Validator::validate_cultural_group(
            &request.cultural_group,
            &self.policy.known_cultural_groups,
        )?;

        let item = self
            .update_item_guarded(&request.item_id, |item| item.lend().map(|_| true))
            .await?
            .ok_or_else(|| {
                AppError::ItemNotAvailable(format!("Item {} is not available", request.item_id))
            })?;

        let borrower = Borrower::new(
            request.borrower_name,
            request.borrower_document,
            request.borrower_phone,
            request.borrower_email,
        );
        let new_loan = NewLoan::new(borrower, request.cultural_group, &item, request.loan_date);

        match self.loan_repo.insert(&new_loan).await {
            Ok(id) => {
                log_info!(
                    "Created loan {} of '{}' ({}) to {} for {}",
                    id,
                    item.name,
                    item.serial_number,
                    new_loan.borrower.document,
                    new_loan.cultural_group
                );
                Ok(id)
            }
            Err(err) => {
                LogContext::error_with_context(&err, "Failed to record loan");
                self.release_claim(&item).await;
                Err(err)
            }
        }
    }

    /// Close an active loan and put the item back on the shelf.
    ///
    /// If the item cannot be written the loan is reopened, so the return can
    /// be retried instead of failing with `AlreadyReturned`.
    pub async fn return_loan(&self, id: &Uuid) -> AppResult<()> {
        let loan = self.mark_loan_returned(id).await?;

        let released = self
            .update_item_guarded(&loan.item.item_id, |item| Ok(item.receive_back()))
            .await;
        match released {
            Ok(Some(_)) => {}
            Ok(None) => log_warn!(
                "Item {} of returned loan {} was not on loan; status left as is",
                loan.item.item_id,
                id
            ),
            Err(AppError::NotFound(_)) => log_warn!(
                "Item {} of returned loan {} no longer exists",
                loan.item.item_id,
                id
            ),
            Err(err) => {
                LogContext::error_with_context(&err, "Failed to release returned item");
                self.reopen_loan(id).await;
                return Err(err);
            }
        }

        log_info!(
            "Returned loan {} of '{}' ({})",
            id,
            loan.item.item_name,
            loan.item.item_serial_number
        );
        Ok(())
    }

    pub async fn get_loan(&self, id: &Uuid) -> AppResult<Loan> {
        self.loan_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with ID {} not found", id)))
    }

    /// All loans, most recent loan date first
    pub async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.loan_repo.get_all().await
    }

    pub async fn list_active_loans(&self) -> AppResult<Vec<Loan>> {
        let loans = self.list_loans().await?;
        Ok(loans.into_iter().filter(Loan::is_active).collect())
    }

    pub async fn search_loans(&self, term: &str) -> AppResult<Vec<Loan>> {
        let loans = self.list_loans().await?;
        let found: Vec<Loan> = loans.into_iter().filter(|l| l.matches(term)).collect();

        LogContext::search_operation("loans", term, Some(found.len()));
        Ok(found)
    }

    /// Distinct past borrowers matching `term`, for pre-filling a new loan
    pub async fn suggest_borrowers(&self, term: &str) -> AppResult<Vec<BorrowerSuggestion>> {
        let loans = self.loan_repo.get_all_unordered().await?;
        let directory = BorrowerDirectory::from_loans(&loans);
        let suggestions = directory.suggest(term, self.policy.suggestion_limit);

        LogContext::search_operation("borrowers", term, Some(suggestions.len()));
        Ok(suggestions)
    }

    async fn mark_loan_returned(&self, id: &Uuid) -> AppResult<Loan> {
        for attempt in 0..=self.policy.max_cas_retries {
            let current = self
                .loan_repo
                .find_versioned(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Loan with ID {} not found", id)))?;
            let version = current.version;
            let mut loan = current.into_inner();
            loan.mark_returned(Utc::now())?;

            if self.loan_repo.update_if_version(&loan, version).await? {
                return Ok(loan);
            }
            log_debug!("Loan {} changed concurrently (attempt {})", id, attempt + 1);
        }

        Err(AppError::Conflict(format!(
            "Loan {} kept changing while being returned",
            id
        )))
    }

    async fn update_item_guarded<F>(
        &self,
        id: &Uuid,
        apply: F,
    ) -> AppResult<Option<InventoryItem>>
    where
        F: FnMut(&mut InventoryItem) -> AppResult<bool> + Send,
    {
        update_item_guarded(
            self.inventory_repo.as_ref(),
            id,
            self.policy.max_cas_retries,
            apply,
        )
        .await
    }

    /// Undo `mark_loan_returned` when the item could not be released
    async fn reopen_loan(&self, id: &Uuid) {
        match self.try_reopen_loan(id).await {
            Ok(true) => log_warn!("Reopened loan {} after its item could not be released", id),
            Ok(false) => log_warn!("Loan {} was not reopened; it is no longer returned", id),
            Err(err) => log_error!(
                "Loan {} is left returned while its item is still loaned: {}",
                id,
                err
            ),
        }
    }

    async fn try_reopen_loan(&self, id: &Uuid) -> AppResult<bool> {
        for attempt in 0..=self.policy.max_cas_retries {
            let Some(current) = self.loan_repo.find_versioned(id).await? else {
                return Ok(false);
            };
            let version = current.version;
            let mut loan = current.into_inner();

            if !loan.reopen() {
                return Ok(false);
            }
            if self.loan_repo.update_if_version(&loan, version).await? {
                return Ok(true);
            }
            log_debug!("Loan {} changed concurrently (attempt {})", id, attempt + 1);
        }

        Err(AppError::Conflict(format!(
            "Loan {} kept changing while being reopened",
            id
        )))
    }

    /// Undo a claim made by `create_loan` whose loan record was never written
    async fn release_claim(&self, item: &InventoryItem) {
        let restored = self
            .update_item_guarded(&item.id, |current| Ok(current.receive_back()))
            .await;

        let outcome = match restored {
            Ok(Some(_)) => self.inventory_repo.adjust_loan_count(&item.id, -1).await.map(|_| ()),
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => log_warn!("Released item {} after failed loan insert", item.id),
            Err(err) => log_error!(
                "Item {} is left loaned without a loan record: {}",
                item.id,
                err
            ),
        }
    }
}
