use crate::domains::project::types::{Project, ProjectFilter};
use crate::errors::DomainResult;
use uuid::Uuid;

/// Collaborator query surface for project records.
pub trait ProjectRepository: Send + Sync {
    /// List projects satisfying the filter.
    fn list(&self, filter: &ProjectFilter) -> DomainResult<Vec<Project>>;

    /// Fetch a single project, failing with `EntityNotFound` for unknown ids.
    fn find_by_id(&self, id: Uuid) -> DomainResult<Project>;
}
