/// Test data factories using builder pattern
///
/// Provides convenient methods to create requests with sensible defaults
use chrono::{DateTime, TimeZone, Utc};
use culturastock_lib::modules::{damage::CreateDamageReportRequest, loans::CreateLoanRequest};
use uuid::Uuid;

pub struct LoanRequestFactory {
    item_id: Uuid,
    borrower_name: String,
    borrower_document: String,
    borrower_phone: String,
    borrower_email: String,
    cultural_group: String,
    loan_date: DateTime<Utc>,
}

impl LoanRequestFactory {
    pub fn new(item_id: Uuid) -> Self {
        Self {
            item_id,
            borrower_name: "Ana".to_string(),
            borrower_document: "123".to_string(),
            borrower_phone: "555-0101".to_string(),
            borrower_email: "ana@uni.edu".to_string(),
            cultural_group: "Tuna".to_string(),
            loan_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
        }
    }

    pub fn borrower(mut self, name: &str, document: &str) -> Self {
        self.borrower_name = name.to_string();
        self.borrower_document = document.to_string();
        self.borrower_email = format!("{}@uni.edu", name.to_lowercase());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.borrower_email = email.to_string();
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.cultural_group = group.to_string();
        self
    }

    pub fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.loan_date = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap();
        self
    }

    pub fn build(self) -> CreateLoanRequest {
        CreateLoanRequest {
            borrower_name: self.borrower_name,
            borrower_document: self.borrower_document,
            borrower_phone: self.borrower_phone,
            borrower_email: self.borrower_email,
            cultural_group: self.cultural_group,
            item_id: self.item_id,
            loan_date: self.loan_date,
        }
    }
}

pub fn damage_request(item_id: Uuid, severity: &str) -> CreateDamageReportRequest {
    CreateDamageReportRequest {
        item_id,
        reported_by: "Luis".to_string(),
        damage_description: "Cuerda rota".to_string(),
        severity: severity.to_string(),
    }
}
