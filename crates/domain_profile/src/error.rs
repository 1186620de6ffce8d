//! Profile domain errors

use thiserror::Error;

use core_kernel::{PortError, ProfileId};

/// Errors that can occur in profile administration
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(ProfileId),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The persistence collaborator rejected the operation
    #[error("Persistence error: {0}")]
    Persistence(#[source] PortError),
}

impl From<PortError> for ProfileError {
    fn from(error: PortError) -> Self {
        ProfileError::Persistence(error)
    }
}
