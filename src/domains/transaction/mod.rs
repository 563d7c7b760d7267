pub mod repository;
pub mod types;

pub use repository::TransactionRepository;
pub use types::{Transaction, TransactionFilter, TransactionStatus};
