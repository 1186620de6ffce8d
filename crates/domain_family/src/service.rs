//! Family registry service
//!
//! Stateless application service constructed with injected collaborators,
//! replacing the portal's old static service object. All operations return
//! typed results; only document uploads are swallowed as non-fatal.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{FamilyMemberId, PortError, ProfileId};
use domain_documents::{AttachmentCategory, AttachmentService};

use crate::eligibility::can_add_relation;
use crate::error::FamilyError;
use crate::member::{FamilyMember, FamilyMemberPatch, NewFamilyMember};
use crate::ports::FamilyPort;
use crate::relation::Relation;

/// Application service for the family registry
#[derive(Clone)]
pub struct FamilyService {
    port: Arc<dyn FamilyPort>,
    attachments: AttachmentService,
}

impl FamilyService {
    pub fn new(port: Arc<dyn FamilyPort>, attachments: AttachmentService) -> Self {
        Self { port, attachments }
    }

    /// Dependents of one owner, newest first
    pub async fn list(&self, owner_id: ProfileId) -> Result<Vec<FamilyMember>, FamilyError> {
        Ok(self.port.list_for_owner(owner_id).await?)
    }

    /// Retrieves one dependent
    pub async fn get(&self, id: FamilyMemberId) -> Result<FamilyMember, FamilyError> {
        self.port.get(id).await.map_err(not_found_as_domain(id))
    }

    /// Whether one more dependent with this relation fits under the caps
    pub async fn can_add_relation(
        &self,
        owner_id: ProfileId,
        relation: Relation,
    ) -> Result<bool, FamilyError> {
        let existing = self.port.list_for_owner(owner_id).await?;
        Ok(can_add_relation(&existing, relation))
    }

    /// Registers a new dependent
    ///
    /// The eligibility check reads the registry and the insert follows
    /// without a transaction boundary: two concurrent adds for the same
    /// owner and relation can both pass. The storage layer's unique
    /// constraints are the backstop for that race.
    pub async fn add(
        &self,
        owner_id: ProfileId,
        draft: NewFamilyMember,
    ) -> Result<FamilyMember, FamilyError> {
        if draft.first_name.trim().is_empty() || draft.last_name.trim().is_empty() {
            return Err(FamilyError::Validation(
                "first and last name are required".to_string(),
            ));
        }

        let existing = self.port.list_for_owner(owner_id).await?;
        if !can_add_relation(&existing, draft.relation) {
            debug!(%owner_id, relation = %draft.relation, "registration refused by cardinality rule");
            return Err(FamilyError::RelationLimitReached {
                relation: draft.relation,
            });
        }

        let (fields, upload) = draft.into_parts();
        let document = self
            .attachments
            .resolve(upload.as_ref(), AttachmentCategory::Family)
            .await;

        let member = FamilyMember::register(owner_id, fields, document);
        self.port.insert(&member).await?;

        info!(%owner_id, member_id = %member.id, relation = %member.relation, "family member registered");
        Ok(member)
    }

    /// Applies a partial update, including the tri-state document policy
    pub async fn update(
        &self,
        id: FamilyMemberId,
        patch: FamilyMemberPatch,
    ) -> Result<FamilyMember, FamilyError> {
        let mut member = self.port.get(id).await.map_err(not_found_as_domain(id))?;

        member.apply_scalar_patch(&patch);
        member.justification_document = self
            .attachments
            .apply_patch(
                member.justification_document.take(),
                patch.document,
                AttachmentCategory::Family,
            )
            .await;

        self.port.update(&member).await?;
        Ok(member)
    }

    /// Removes a dependent; attached documents stay with the blob store
    pub async fn delete(&self, id: FamilyMemberId) -> Result<(), FamilyError> {
        self.port.delete(id).await.map_err(not_found_as_domain(id))?;
        info!(member_id = %id, "family member deleted");
        Ok(())
    }
}

fn not_found_as_domain(id: FamilyMemberId) -> impl FnOnce(PortError) -> FamilyError {
    move |error| {
        if error.is_not_found() {
            FamilyError::NotFound(id)
        } else {
            FamilyError::Persistence(error)
        }
    }
}
