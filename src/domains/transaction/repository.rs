use crate::domains::transaction::types::{Transaction, TransactionFilter};
use crate::errors::DomainResult;

/// Collaborator query surface for settlement transactions.
pub trait TransactionRepository: Send + Sync {
    /// List transactions satisfying the filter.
    fn list(&self, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>>;
}
