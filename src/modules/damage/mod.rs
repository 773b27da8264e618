/// Damage reports bounded context
///
/// Reports filed against inventory items. Reports are informational and never
/// change an item's status.
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CreateDamageReportRequest, DamageReportService};
pub use domain::{DamageReport, DamageReportRepository, DamageStatus, NewDamageReport, Severity};
pub use infrastructure::DamageReportRepositoryImpl;
