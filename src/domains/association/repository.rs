use crate::domains::association::types::{Association, AssociationFilter};
use crate::errors::DomainResult;
use uuid::Uuid;

/// Collaborator query surface for association records.
pub trait AssociationRepository: Send + Sync {
    /// List associations satisfying the filter.
    fn list(&self, filter: &AssociationFilter) -> DomainResult<Vec<Association>>;

    /// Fetch a single association, failing with `EntityNotFound` for
    /// unknown ids.
    fn find_by_id(&self, id: Uuid) -> DomainResult<Association>;
}
