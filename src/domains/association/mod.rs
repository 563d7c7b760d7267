pub mod repository;
pub mod types;

pub use repository::AssociationRepository;
pub use types::{Association, AssociationFilter};
