//! Adapters for the storage collaborator

pub mod blob_store;

pub use blob_store::{ExternalBlobStoreAdapter, ExternalBlobStoreConfig};
