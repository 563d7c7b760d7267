use crate::domains::donation::types::{Donation, DonationFilter};
use crate::errors::DomainResult;

/// Collaborator query surface for donation records.
///
/// Implementations live outside the engine (storage layer, test fakes) and
/// finish any I/O before returning; the engine itself never suspends.
pub trait DonationRepository: Send + Sync {
    /// List donations satisfying the filter.
    fn list(&self, filter: &DonationFilter) -> DomainResult<Vec<Donation>>;
}
