/// Loans bounded context
///
/// Lending items to borrowers on behalf of cultural groups, returning them,
/// and suggesting past borrowers.
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{CreateLoanRequest, LoanPolicy, LoanService};
pub use domain::{
    Borrower, BorrowerDirectory, BorrowerSuggestion, Loan, LoanRepository, LoanStatus, LoanedItem,
    NewLoan,
};
pub use infrastructure::LoanRepositoryImpl;
