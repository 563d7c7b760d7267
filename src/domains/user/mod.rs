pub mod repository;
pub mod types;

pub use repository::UserDirectory;
pub use types::{UserRole, UserSummary};
