//! Attachment domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised while binding a document to a record
///
/// Attachment failures are non-fatal by policy: services catch this error,
/// log it, and proceed without the document.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Upload rejected by storage collaborator: {0}")]
    Upload(#[from] PortError),

    #[error("Empty file: {file_name}")]
    EmptyFile { file_name: String },
}
