/// Document-store implementation of LoanRepository
use super::mapper::{
    field, loan_from_document, new_loan_fields, state_fields, versioned_loan_from_document,
    LOANS_COLLECTION,
};
use crate::modules::loans::domain::{Loan, LoanRepository, NewLoan};
use crate::shared::domain::Versioned;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::{Document, DocumentStore, SortDirection};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct LoanRepositoryImpl {
    store: Arc<dyn DocumentStore>,
}

impl LoanRepositoryImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn to_loans(documents: Vec<Document>) -> AppResult<Vec<Loan>> {
        documents.iter().map(loan_from_document).collect()
    }
}

#[async_trait]
impl LoanRepository for LoanRepositoryImpl {
    async fn insert(&self, loan: &NewLoan) -> AppResult<Uuid> {
        self.store
            .insert_one(LOANS_COLLECTION, new_loan_fields(loan))
            .await
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Loan>> {
        self.store
            .get_by_id(LOANS_COLLECTION, *id)
            .await?
            .map(|doc| loan_from_document(&doc))
            .transpose()
    }

    async fn find_versioned(&self, id: &Uuid) -> AppResult<Option<Versioned<Loan>>> {
        self.store
            .get_by_id(LOANS_COLLECTION, *id)
            .await?
            .map(|doc| versioned_loan_from_document(&doc))
            .transpose()
    }

    async fn get_all(&self) -> AppResult<Vec<Loan>> {
        let documents = self
            .store
            .list_ordered(LOANS_COLLECTION, field::LOAN_DATE, SortDirection::Descending)
            .await?;
        Self::to_loans(documents)
    }

    async fn get_all_unordered(&self) -> AppResult<Vec<Loan>> {
        let documents = self.store.list_all(LOANS_COLLECTION).await?;
        Self::to_loans(documents)
    }

    async fn update_if_version(&self, loan: &Loan, expected_version: u64) -> AppResult<bool> {
        self.store
            .update_if_version(LOANS_COLLECTION, loan.id, expected_version, state_fields(loan))
            .await
    }
}
