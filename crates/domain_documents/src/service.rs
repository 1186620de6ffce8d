//! Attachment service
//!
//! Wraps the storage collaborator and enforces the document policies shared
//! by every record type that can carry a justification document.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::attachment::{AttachmentCategory, DocumentPatch, DocumentRef, FileUpload};
use crate::error::AttachmentError;
use crate::ports::StoragePort;

/// Service binding uploads to domain records
///
/// Constructed with the storage collaborator injected so tests can
/// substitute an in-memory mock.
#[derive(Clone)]
pub struct AttachmentService {
    storage: Arc<dyn StoragePort>,
}

impl AttachmentService {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Uploads one file and wraps the result into a persistable reference
    pub async fn upload(
        &self,
        upload: &FileUpload,
        category: AttachmentCategory,
    ) -> Result<DocumentRef, AttachmentError> {
        if upload.bytes.is_empty() {
            return Err(AttachmentError::EmptyFile {
                file_name: upload.file_name.clone(),
            });
        }

        let stored = self.storage.upload_file(upload, category).await?;
        Ok(DocumentRef::from_stored(stored, Utc::now()))
    }

    /// Resolves an optional upload into an optional reference
    ///
    /// Upload failure is non-fatal: the enclosing create proceeds without a
    /// document. The failure is logged and swallowed here.
    pub async fn resolve(
        &self,
        upload: Option<&FileUpload>,
        category: AttachmentCategory,
    ) -> Option<DocumentRef> {
        let upload = upload?;
        match self.upload(upload, category).await {
            Ok(doc) => Some(doc),
            Err(error) => {
                warn!(
                    file_name = %upload.file_name,
                    %category,
                    %error,
                    "document upload failed, continuing without attachment"
                );
                None
            }
        }
    }

    /// Applies the tri-state document patch to an existing reference
    ///
    /// - `Keep`: the stored reference comes back untouched
    /// - `Clear`: the reference is nulled out
    /// - `Replace`: the new file is uploaded and swapped in; if the upload
    ///   fails the prior reference survives (stale-but-safe)
    pub async fn apply_patch(
        &self,
        current: Option<DocumentRef>,
        patch: DocumentPatch,
        category: AttachmentCategory,
    ) -> Option<DocumentRef> {
        match patch {
            DocumentPatch::Keep => current,
            DocumentPatch::Clear => None,
            DocumentPatch::Replace(upload) => match self.upload(&upload, category).await {
                Ok(doc) => Some(doc),
                Err(error) => {
                    warn!(
                        file_name = %upload.file_name,
                        %category,
                        %error,
                        "replacement upload failed, keeping existing document"
                    );
                    current
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockStoragePort;

    fn service(port: Arc<MockStoragePort>) -> AttachmentService {
        AttachmentService::new(port)
    }

    fn pdf(name: &str) -> FileUpload {
        FileUpload::new(name, "application/pdf", vec![0u8; 16])
    }

    fn existing_doc() -> DocumentRef {
        DocumentRef {
            name: "ancien.pdf".to_string(),
            url: "https://blobs.local/family/ancien.pdf".to_string(),
            path: "family/ancien.pdf".to_string(),
            size: 9,
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_resolve_none_is_none() {
        let svc = service(Arc::new(MockStoragePort::new()));
        assert!(svc.resolve(None, AttachmentCategory::Demands).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_success_wraps_reference() {
        let svc = service(Arc::new(MockStoragePort::new()));

        let doc = svc
            .resolve(Some(&pdf("acte.pdf")), AttachmentCategory::Family)
            .await
            .unwrap();

        assert_eq!(doc.name, "acte.pdf");
        assert_eq!(doc.path, "family/acte.pdf");
        assert_eq!(doc.size, 16);
    }

    #[tokio::test]
    async fn test_resolve_failure_is_non_fatal() {
        let svc = service(Arc::new(MockStoragePort::failing()));

        let doc = svc
            .resolve(Some(&pdf("acte.pdf")), AttachmentCategory::Family)
            .await;

        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let svc = service(Arc::new(MockStoragePort::new()));
        let empty = FileUpload::new("vide.pdf", "application/pdf", vec![]);

        let result = svc.upload(&empty, AttachmentCategory::Demands).await;
        assert!(matches!(result, Err(AttachmentError::EmptyFile { .. })));
    }

    #[tokio::test]
    async fn test_patch_keep_leaves_reference_untouched() {
        let svc = service(Arc::new(MockStoragePort::new()));
        let before = existing_doc();

        let after = svc
            .apply_patch(Some(before.clone()), DocumentPatch::Keep, AttachmentCategory::Family)
            .await;

        assert_eq!(after, Some(before));
    }

    #[tokio::test]
    async fn test_patch_clear_nulls_reference() {
        let svc = service(Arc::new(MockStoragePort::new()));

        let after = svc
            .apply_patch(Some(existing_doc()), DocumentPatch::Clear, AttachmentCategory::Family)
            .await;

        assert!(after.is_none());
    }

    #[tokio::test]
    async fn test_patch_replace_swaps_reference() {
        let svc = service(Arc::new(MockStoragePort::new()));

        let after = svc
            .apply_patch(
                Some(existing_doc()),
                DocumentPatch::Replace(pdf("nouveau.pdf")),
                AttachmentCategory::Family,
            )
            .await
            .unwrap();

        assert_eq!(after.name, "nouveau.pdf");
    }

    #[tokio::test]
    async fn test_patch_replace_failure_keeps_old_reference() {
        let svc = service(Arc::new(MockStoragePort::failing()));
        let before = existing_doc();

        let after = svc
            .apply_patch(
                Some(before.clone()),
                DocumentPatch::Replace(pdf("nouveau.pdf")),
                AttachmentCategory::Family,
            )
            .await;

        assert_eq!(after, Some(before));
    }
}
