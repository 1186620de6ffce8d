//! Document Attachment Domain
//!
//! This crate binds uploaded files to domain records. The bytes themselves
//! live in an external blob store reached through the [`StoragePort`]
//! collaborator; the domain only ever persists a [`DocumentRef`] sub-record
//! describing where the blob landed.
//!
//! Upload failure is a valid, non-fatal outcome: a record without a
//! justification document is still a record. The [`AttachmentService`]
//! therefore converts collaborator failures into "no attachment" after
//! logging, and enclosing create/update operations carry on.

pub mod attachment;
pub mod ports;
pub mod service;
pub mod adapters;
pub mod error;

pub use attachment::{
    AttachmentCategory, DocumentPatch, DocumentRef, FileUpload, StoredObject,
};
pub use ports::StoragePort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockStoragePort;
pub use service::AttachmentService;
pub use adapters::{ExternalBlobStoreAdapter, ExternalBlobStoreConfig};
pub use error::AttachmentError;
