// Public modules
pub mod domains;
pub mod errors;

// Convenience re-exports for the embedding layer (FFI / HTTP handlers)
pub use domains::stats::period::PeriodWindow;
pub use domains::stats::service::{StatisticsService, StatisticsServiceImpl};
pub use domains::stats::types::StatsConfig;
pub use errors::{DomainError, DomainResult, ServiceError, ServiceResult};
