//! Family domain errors

use thiserror::Error;

use core_kernel::{FamilyMemberId, PortError};

use crate::relation::Relation;

/// Errors that can occur in the family registry
#[derive(Debug, Error)]
pub enum FamilyError {
    /// The owner already holds the maximum number of dependents for this relation
    #[error("Relation limit reached: {relation}")]
    RelationLimitReached { relation: Relation },

    #[error("Family member not found: {0}")]
    NotFound(FamilyMemberId),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The persistence collaborator rejected the operation
    #[error("Persistence error: {0}")]
    Persistence(#[source] PortError),
}

impl From<PortError> for FamilyError {
    fn from(error: PortError) -> Self {
        FamilyError::Persistence(error)
    }
}
