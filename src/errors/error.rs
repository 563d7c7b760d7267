use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors.
///
/// The aggregation engine defines no arithmetic failures of its own; every
/// variant here originates in a collaborator (entity lookup, record store)
/// and is propagated unchanged to the caller.
#[derive(Debug, Error, Clone, Serialize)]
pub enum DomainError {
    #[error("Entity not found: {0} with ID {1}")]
    EntityNotFound(String, Uuid),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External collaborator error: {0}")]
    External(String),
}

/// Service-level errors (application specific)
#[derive(Debug, Error, Clone, Serialize)]
pub enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
