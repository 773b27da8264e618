pub mod mapper;
pub mod repository;

pub use repository::DamageReportRepositoryImpl;
