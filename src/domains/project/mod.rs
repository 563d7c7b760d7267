pub mod repository;
pub mod types;

pub use repository::ProjectRepository;
pub use types::{Project, ProjectFilter, ProjectStatus};
