//! File payloads
//!
//! Files travel base64-encoded inside the JSON body; the core re-uploads
//! them to the blob-storage provider and persists only the reference.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use domain_documents::FileUpload;

use crate::error::ApiError;

/// A file submitted inline with a form
#[derive(Debug, Clone, Deserialize)]
pub struct UploadPayload {
    pub file_name: String,
    pub content_type: String,
    /// Base64-encoded file contents
    pub data: String,
}

impl UploadPayload {
    /// Decodes the payload into a domain upload
    pub fn into_file_upload(self) -> Result<FileUpload, ApiError> {
        let bytes = BASE64
            .decode(self.data.as_bytes())
            .map_err(|_| ApiError::BadRequest("justification document is not valid base64".to_string()))?;
        Ok(FileUpload::new(self.file_name, self.content_type, bytes))
    }
}

/// Tri-state JSON field: absent keeps, `null` clears, a value replaces
///
/// `#[serde(default)]` on the carrying field maps "absent" to `Keep`; the
/// custom Deserialize below maps explicit `null` to `Clear`.
#[derive(Debug, Clone, Default)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => FieldPatch::Set(value),
            None => FieldPatch::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Carrier {
        #[serde(default)]
        document: FieldPatch<UploadPayload>,
    }

    #[test]
    fn test_absent_field_keeps() {
        let carrier: Carrier = serde_json::from_str("{}").unwrap();
        assert!(matches!(carrier.document, FieldPatch::Keep));
    }

    #[test]
    fn test_null_clears() {
        let carrier: Carrier = serde_json::from_str(r#"{"document": null}"#).unwrap();
        assert!(matches!(carrier.document, FieldPatch::Clear));
    }

    #[test]
    fn test_value_replaces() {
        let carrier: Carrier = serde_json::from_str(
            r#"{"document": {"file_name": "a.pdf", "content_type": "application/pdf", "data": "aGVsbG8="}}"#,
        )
        .unwrap();
        assert!(matches!(carrier.document, FieldPatch::Set(_)));
    }

    #[test]
    fn test_base64_decoding() {
        let payload = UploadPayload {
            file_name: "a.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: "aGVsbG8=".to_string(),
        };
        let upload = payload.into_file_upload().unwrap();
        assert_eq!(upload.bytes, b"hello");
    }

    #[test]
    fn test_bad_base64_is_rejected() {
        let payload = UploadPayload {
            file_name: "a.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: "%%%not-base64%%%".to_string(),
        };
        assert!(payload.into_file_upload().is_err());
    }
}
