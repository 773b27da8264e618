pub mod borrowers;
pub mod entities;
pub mod repository;
pub mod value_objects;

pub use borrowers::{BorrowerDirectory, BorrowerSuggestion};
pub use entities::{Borrower, Loan, LoanedItem, NewLoan};
pub use repository::LoanRepository;
pub use value_objects::LoanStatus;
