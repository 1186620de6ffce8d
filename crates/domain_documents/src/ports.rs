//! Storage collaborator port
//!
//! The blob store is an external system; the domain only knows the
//! [`StoragePort`] seam. Adapters:
//!
//! - **External adapter**: REST calls to the storage provider
//!   ([`crate::adapters::ExternalBlobStoreAdapter`])
//! - **Mock adapter**: in-memory, for tests without the provider

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::attachment::{AttachmentCategory, FileUpload, StoredObject};

/// Port for the external blob-storage collaborator
#[async_trait]
pub trait StoragePort: DomainPort {
    /// Uploads a file under the given category folder
    ///
    /// # Returns
    ///
    /// The stored object descriptor on success, or a `PortError` when the
    /// provider rejects or cannot be reached. Callers decide whether the
    /// failure is fatal; for attachments it never is.
    async fn upload_file(
        &self,
        upload: &FileUpload,
        category: AttachmentCategory,
    ) -> Result<StoredObject, PortError>;
}

/// Mock implementation of StoragePort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of StoragePort
    ///
    /// Records every upload it accepts and can be switched into a failing
    /// mode to exercise the non-fatal failure paths.
    #[derive(Debug, Default)]
    pub struct MockStoragePort {
        uploads: Arc<RwLock<Vec<(AttachmentCategory, String)>>>,
        failing: AtomicBool,
    }

    impl MockStoragePort {
        /// Creates a new mock port that accepts every upload
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mock port that rejects every upload
        pub fn failing() -> Self {
            let port = Self::default();
            port.failing.store(true, Ordering::Relaxed);
            port
        }

        /// Switches the failure mode on or off
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::Relaxed);
        }

        /// Number of uploads accepted so far
        pub async fn upload_count(&self) -> usize {
            self.uploads.read().await.len()
        }

        /// Category and file name of every accepted upload
        pub async fn uploads(&self) -> Vec<(AttachmentCategory, String)> {
            self.uploads.read().await.clone()
        }
    }

    impl DomainPort for MockStoragePort {}

    #[async_trait]
    impl StoragePort for MockStoragePort {
        async fn upload_file(
            &self,
            upload: &FileUpload,
            category: AttachmentCategory,
        ) -> Result<StoredObject, PortError> {
            if self.failing.load(Ordering::Relaxed) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-blob-store".to_string(),
                });
            }

            self.uploads
                .write()
                .await
                .push((category, upload.file_name.clone()));

            Ok(StoredObject {
                name: upload.file_name.clone(),
                url: format!("https://blobs.local/{}/{}", category, upload.file_name),
                path: format!("{}/{}", category, upload.file_name),
                size: upload.size(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockStoragePort;
    use super::*;

    fn sample_upload() -> FileUpload {
        FileUpload::new("facture.pdf", "application/pdf", vec![1, 2, 3, 4])
    }

    #[tokio::test]
    async fn test_mock_upload_success() {
        let port = MockStoragePort::new();

        let stored = port
            .upload_file(&sample_upload(), AttachmentCategory::Demands)
            .await
            .unwrap();

        assert_eq!(stored.name, "facture.pdf");
        assert_eq!(stored.path, "demands/facture.pdf");
        assert_eq!(stored.size, 4);
        assert_eq!(port.upload_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_upload_failure_records_nothing() {
        let port = MockStoragePort::failing();

        let result = port
            .upload_file(&sample_upload(), AttachmentCategory::Family)
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().is_transient());
        assert_eq!(port.upload_count().await, 0);
    }
}
