pub mod dto;
pub mod service;

pub use dto::CreateLoanRequest;
pub use service::{LoanPolicy, LoanService};
