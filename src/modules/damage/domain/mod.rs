pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::{DamageReport, NewDamageReport};
pub use repository::DamageReportRepository;
pub use value_objects::{DamageStatus, Severity};
