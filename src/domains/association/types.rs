use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An association that owns projects and receives donations on their behalf.
///
/// Validation is granted by the platform back office; only validated
/// associations count as active in aggregate reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub id: Uuid,
    pub name: String,
    pub validated: bool,
    pub validated_at: Option<DateTime<Utc>>,
}

/// Association filtering capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssociationFilter {
    /// Filter by validation flag
    pub validated: Option<bool>,
    /// Keep only associations validated at or after this instant
    pub validated_since: Option<DateTime<Utc>>,
}

impl AssociationFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add validation flag filter.
    pub fn with_validated(mut self, validated: bool) -> Self {
        self.validated = Some(validated);
        self
    }

    /// Keep only associations validated at or after the given instant.
    pub fn with_validated_since(mut self, since: DateTime<Utc>) -> Self {
        self.validated_since = Some(since);
        self
    }

    /// Whether an association satisfies every set criterion.
    pub fn matches(&self, association: &Association) -> bool {
        if let Some(validated) = self.validated {
            if association.validated != validated {
                return false;
            }
        }
        if let Some(since) = self.validated_since {
            match association.validated_at {
                Some(at) if at >= since => {}
                _ => return false,
            }
        }
        true
    }
}
