/// Repository trait for loan persistence
use super::entities::{Loan, NewLoan};
use crate::shared::domain::Versioned;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn insert(&self, loan: &NewLoan) -> AppResult<Uuid>;

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Loan>>;

    async fn find_versioned(&self, id: &Uuid) -> AppResult<Option<Versioned<Loan>>>;

    /// All loans, most recent loan date first
    async fn get_all(&self) -> AppResult<Vec<Loan>>;

    /// All loans in the store's natural scan order
    async fn get_all_unordered(&self) -> AppResult<Vec<Loan>>;

    /// Persist status and return date only if the loan is still at `expected_version`
    async fn update_if_version(&self, loan: &Loan, expected_version: u64) -> AppResult<bool>;
}
