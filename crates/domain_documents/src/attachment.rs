//! Attachment value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A file handed to the core by the interface layer, ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name as submitted
    pub file_name: String,
    /// MIME type reported by the client
    pub content_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size of the payload in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// What the blob store reports back after a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub name: String,
    pub url: String,
    pub path: String,
    pub size: u64,
}

/// Persisted reference to an uploaded document
///
/// Stored as a JSON sub-record on the owning row. Wire keys keep the
/// portal's historical French vocabulary so existing rows deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    #[serde(rename = "nom")]
    pub name: String,
    pub url: String,
    pub path: String,
    #[serde(rename = "taille")]
    pub size: u64,
    #[serde(rename = "dateUpload")]
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentRef {
    /// Wraps a completed upload into the persisted sub-record
    pub fn from_stored(object: StoredObject, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            name: object.name,
            url: object.url,
            path: object.path,
            size: object.size,
            uploaded_at,
        }
    }
}

/// Blob-store folder a document is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentCategory {
    /// Justification documents attached to benefit demands
    Demands,
    /// Civil-status documents attached to family members
    Family,
}

impl AttachmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentCategory::Demands => "demands",
            AttachmentCategory::Family => "family",
        }
    }
}

impl fmt::Display for AttachmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state update instruction for a record's document field
///
/// Distinguishing "field omitted" from "explicitly cleared" is load-bearing:
/// an omitted field must leave the stored reference untouched.
#[derive(Debug, Clone, Default)]
pub enum DocumentPatch {
    /// Leave the existing reference exactly as it is
    #[default]
    Keep,
    /// Upload the given file and swap the reference to it
    Replace(FileUpload),
    /// Null out the reference
    Clear,
}

impl DocumentPatch {
    pub fn is_keep(&self) -> bool {
        matches!(self, DocumentPatch::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ref_wire_keys_are_french() {
        let doc = DocumentRef {
            name: "acte.pdf".to_string(),
            url: "https://blobs.example/family/acte.pdf".to_string(),
            path: "family/acte.pdf".to_string(),
            size: 1204,
            uploaded_at: Utc::now(),
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("nom").is_some());
        assert!(json.get("taille").is_some());
        assert!(json.get("dateUpload").is_some());
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_category_folder_names() {
        assert_eq!(AttachmentCategory::Demands.as_str(), "demands");
        assert_eq!(AttachmentCategory::Family.as_str(), "family");
    }

    #[test]
    fn test_patch_default_is_keep() {
        assert!(DocumentPatch::default().is_keep());
    }
}
