pub mod service;

pub use service::StatisticsService;
