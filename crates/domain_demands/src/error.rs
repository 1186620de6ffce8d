//! Demand domain errors

use thiserror::Error;

use core_kernel::{DemandId, PortError};

use crate::demand::DemandStatus;

/// Errors that can occur in the demand pipeline
#[derive(Debug, Error)]
pub enum DemandError {
    /// A required form field is missing or blank
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested status move is not in the transition graph
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: DemandStatus, to: DemandStatus },

    #[error("Demand not found: {0}")]
    NotFound(DemandId),

    /// The persistence collaborator rejected the operation
    #[error("Persistence error: {0}")]
    Persistence(#[source] PortError),
}

impl From<PortError> for DemandError {
    fn from(error: PortError) -> Self {
        DemandError::Persistence(error)
    }
}
