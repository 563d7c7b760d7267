use crate::domains::user::types::{UserRole, UserSummary};
use crate::errors::DomainResult;
use std::collections::HashMap;
use uuid::Uuid;

/// Collaborator query surface for platform users.
///
/// Donor display names feed report labels only; per-donation anonymity is
/// applied by the engine on top of whatever this directory answers.
pub trait UserDirectory: Send + Sync {
    /// Count users holding the given role.
    fn count_by_role(&self, role: UserRole) -> DomainResult<i64>;

    /// Fetch a donor user, failing with `EntityNotFound` for unknown ids.
    fn find_donor(&self, id: Uuid) -> DomainResult<UserSummary>;

    /// Resolve display names for the given donor ids. Ids the directory
    /// does not know are simply absent from the answer.
    fn donor_display_names(&self, ids: &[Uuid]) -> DomainResult<HashMap<Uuid, String>>;
}
