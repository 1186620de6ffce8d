//! Family member aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{FamilyMemberId, ProfileId};
use domain_documents::{DocumentPatch, DocumentRef, FileUpload};

use crate::relation::Relation;

/// A dependent registered under a society member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Unique identifier
    pub id: FamilyMemberId,
    /// The member this dependent belongs to
    pub owner_id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    /// National personal identification number
    pub national_id: String,
    /// Civil-registry reference of the birth certificate
    pub birth_certificate_ref: String,
    pub date_of_birth: NaiveDate,
    pub relation: Relation,
    /// Optional justification document held in the blob store
    pub justification_document: Option<DocumentRef>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl FamilyMember {
    /// Creates a new registration from a submitted draft
    pub fn register(
        owner_id: ProfileId,
        draft: RegistrationFields,
        document: Option<DocumentRef>,
    ) -> Self {
        Self {
            id: FamilyMemberId::new_v7(),
            owner_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            national_id: draft.national_id,
            birth_certificate_ref: draft.birth_certificate_ref,
            date_of_birth: draft.date_of_birth,
            relation: draft.relation,
            justification_document: document,
            created_at: Utc::now(),
        }
    }
}

/// Scalar fields of a registration, shared by the draft
#[derive(Debug, Clone)]
pub struct RegistrationFields {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub birth_certificate_ref: String,
    pub date_of_birth: NaiveDate,
    pub relation: Relation,
}

/// Registration form data submitted by a member
#[derive(Debug, Clone)]
pub struct NewFamilyMember {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub birth_certificate_ref: String,
    pub date_of_birth: NaiveDate,
    pub relation: Relation,
    /// Optional justification document to upload alongside the registration
    pub justification_document: Option<FileUpload>,
}

impl NewFamilyMember {
    pub(crate) fn into_parts(self) -> (RegistrationFields, Option<FileUpload>) {
        let NewFamilyMember {
            first_name,
            last_name,
            national_id,
            birth_certificate_ref,
            date_of_birth,
            relation,
            justification_document,
        } = self;
        (
            RegistrationFields {
                first_name,
                last_name,
                national_id,
                birth_certificate_ref,
                date_of_birth,
                relation,
            },
            justification_document,
        )
    }
}

/// Partial update for a family member
///
/// Scalar fields use `Option` presence; the document field carries the
/// full tri-state policy (`Keep` / `Replace` / `Clear`). The relation is
/// fixed at registration - changing it would need a fresh eligibility
/// check against the owner's registry.
#[derive(Debug, Clone, Default)]
pub struct FamilyMemberPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<String>,
    pub birth_certificate_ref: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub document: DocumentPatch,
}

impl FamilyMember {
    /// Applies the scalar part of a patch; the document field is resolved
    /// separately through the attachment service
    pub(crate) fn apply_scalar_patch(&mut self, patch: &FamilyMemberPatch) {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(national_id) = &patch.national_id {
            self.national_id = national_id.clone();
        }
        if let Some(birth_certificate_ref) = &patch.birth_certificate_ref {
            self.birth_certificate_ref = birth_certificate_ref.clone();
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(relation: Relation) -> RegistrationFields {
        RegistrationFields {
            first_name: "Ayo".to_string(),
            last_name: "Sossou".to_string(),
            national_id: "1998-0042-117".to_string(),
            birth_certificate_ref: "AC-2023-8841".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1998, 4, 2).unwrap(),
            relation,
        }
    }

    #[test]
    fn test_register_assigns_id_and_timestamp() {
        let owner = ProfileId::new();
        let member = FamilyMember::register(owner, draft(Relation::Child), None);

        assert_eq!(member.owner_id, owner);
        assert_eq!(member.relation, Relation::Child);
        assert!(member.justification_document.is_none());
        assert!(member.id.to_string().starts_with("FAM-"));
    }

    #[test]
    fn test_scalar_patch_only_touches_present_fields() {
        let mut member = FamilyMember::register(ProfileId::new(), draft(Relation::Wife), None);
        let before_dob = member.date_of_birth;

        member.apply_scalar_patch(&FamilyMemberPatch {
            first_name: Some("Reine".to_string()),
            ..Default::default()
        });

        assert_eq!(member.first_name, "Reine");
        assert_eq!(member.last_name, "Sossou");
        assert_eq!(member.date_of_birth, before_dob);
    }
}
