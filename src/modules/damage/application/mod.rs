pub mod dto;
pub mod service;

pub use dto::CreateDamageReportRequest;
pub use service::DamageReportService;
