pub mod association;
pub mod donation;
pub mod project;
pub mod stats;
pub mod transaction;
pub mod user;
