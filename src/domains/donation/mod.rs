pub mod repository;
pub mod types;

pub use repository::DonationRepository;
pub use types::{Donation, DonationFilter, DonationStatus};
