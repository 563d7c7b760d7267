pub mod metrics;
pub mod period;
pub mod profile;
pub mod ranking;
pub mod service;
pub mod types;

pub use period::PeriodWindow;
pub use profile::{association_profile, donor_profile, project_profile, DonorLevel};
pub use ranking::select_top_n;
pub use service::{StatisticsService, StatisticsServiceImpl};
pub use types::StatsConfig;
