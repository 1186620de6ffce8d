//! Family registry DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_documents::{DocumentPatch, DocumentRef};
use domain_family::{FamilyMember, FamilyMemberPatch, NewFamilyMember, Relation};

use crate::dto::upload::{FieldPatch, UploadPayload};
use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFamilyMemberRequest {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "national id is required"))]
    pub national_id: String,
    pub birth_certificate_ref: String,
    pub date_of_birth: NaiveDate,
    /// Relation wire name ("epoux", "enfant", ...)
    pub relation: String,
    pub justification_document: Option<UploadPayload>,
}

impl CreateFamilyMemberRequest {
    pub fn into_draft(self) -> Result<NewFamilyMember, ApiError> {
        let relation: Relation = self
            .relation
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("unknown relation: {}", self.relation)))?;

        let justification_document = self
            .justification_document
            .map(UploadPayload::into_file_upload)
            .transpose()?;

        Ok(NewFamilyMember {
            first_name: self.first_name,
            last_name: self.last_name,
            national_id: self.national_id,
            birth_certificate_ref: self.birth_certificate_ref,
            date_of_birth: self.date_of_birth,
            relation,
            justification_document,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFamilyMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<String>,
    pub birth_certificate_ref: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Absent keeps the stored document, `null` clears it, a payload replaces it
    #[serde(default)]
    pub justification_document: FieldPatch<UploadPayload>,
}

impl UpdateFamilyMemberRequest {
    pub fn into_patch(self) -> Result<FamilyMemberPatch, ApiError> {
        let document = match self.justification_document {
            FieldPatch::Keep => DocumentPatch::Keep,
            FieldPatch::Clear => DocumentPatch::Clear,
            FieldPatch::Set(payload) => DocumentPatch::Replace(payload.into_file_upload()?),
        };

        Ok(FamilyMemberPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            national_id: self.national_id,
            birth_certificate_ref: self.birth_certificate_ref,
            date_of_birth: self.date_of_birth,
            document,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FamilyMemberResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub birth_certificate_ref: String,
    pub date_of_birth: NaiveDate,
    pub relation: String,
    pub justification_document: Option<DocumentRef>,
    pub created_at: DateTime<Utc>,
}

impl From<FamilyMember> for FamilyMemberResponse {
    fn from(member: FamilyMember) -> Self {
        Self {
            id: member.id.into(),
            owner_id: member.owner_id.into(),
            first_name: member.first_name,
            last_name: member.last_name,
            national_id: member.national_id,
            birth_certificate_ref: member.birth_certificate_ref,
            date_of_birth: member.date_of_birth,
            relation: member.relation.as_str().to_string(),
            justification_document: member.justification_document,
            created_at: member.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub relation: String,
    pub can_add: bool,
}
