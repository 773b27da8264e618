pub mod damage;
pub mod inventory;
pub mod loans;
pub mod statistics;
