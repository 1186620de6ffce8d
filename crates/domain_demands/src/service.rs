//! Demand lifecycle service
//!
//! Stateless application service constructed with injected collaborators.
//! Demand writes are primary; the submission notification is a secondary,
//! non-transactional write that never rolls the demand back.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{DemandId, PortError, ProfileId, Role};
use domain_documents::{AttachmentCategory, AttachmentService};

use crate::demand::{Demand, DemandStatus, NewDemand, Reviewer};
use crate::error::DemandError;
use crate::notification::Notification;
use crate::ports::{DemandPort, DemandQuery, NotificationPort};
use crate::visibility::DemandScope;

/// Application service for the demand pipeline
#[derive(Clone)]
pub struct DemandService {
    demands: Arc<dyn DemandPort>,
    notifications: Arc<dyn NotificationPort>,
    attachments: AttachmentService,
}

impl DemandService {
    pub fn new(
        demands: Arc<dyn DemandPort>,
        notifications: Arc<dyn NotificationPort>,
        attachments: AttachmentService,
    ) -> Self {
        Self {
            demands,
            notifications,
            attachments,
        }
    }

    /// Submits a new demand on behalf of a member
    ///
    /// The demand lands in `en_attente`. The confirmation notification is
    /// written after the demand and independently of it.
    pub async fn create(
        &self,
        member_id: ProfileId,
        member_name: impl Into<String>,
        draft: NewDemand,
    ) -> Result<Demand, DemandError> {
        if draft.service_type.trim().is_empty() {
            return Err(DemandError::Validation("service type is required".to_string()));
        }
        if draft.beneficiary_name.trim().is_empty() {
            return Err(DemandError::Validation(
                "beneficiary name is required".to_string(),
            ));
        }

        let (fields, upload) = draft.into_parts();
        let document = self
            .attachments
            .resolve(upload.as_ref(), AttachmentCategory::Demands)
            .await;

        let demand = Demand::submit(member_id, member_name, fields, document);
        self.demands.insert(&demand).await?;
        info!(demand_id = %demand.id, %member_id, service_type = %demand.service_type, "demand submitted");

        let notification = Notification::demand_submitted(&demand);
        if let Err(error) = self.notifications.create(&notification).await {
            warn!(demand_id = %demand.id, %error, "submission notification failed, demand kept");
        }

        Ok(demand)
    }

    /// Applies a reviewer decision to a demand
    pub async fn update_status(
        &self,
        id: DemandId,
        target: DemandStatus,
        reviewer: Reviewer,
        comment: Option<String>,
    ) -> Result<Demand, DemandError> {
        let mut demand = self.demands.get(id).await.map_err(not_found_as_domain(id))?;

        demand.transition(target, reviewer, comment)?;
        self.demands.update(&demand).await?;

        info!(demand_id = %id, status = %demand.status, "demand transitioned");
        Ok(demand)
    }

    /// Hard delete, unconditional
    pub async fn delete(&self, id: DemandId) -> Result<(), DemandError> {
        self.demands.delete(id).await.map_err(not_found_as_domain(id))?;
        info!(demand_id = %id, "demand deleted");
        Ok(())
    }

    /// Retrieves one demand
    pub async fn get(&self, id: DemandId) -> Result<Demand, DemandError> {
        self.demands.get(id).await.map_err(not_found_as_domain(id))
    }

    /// Every demand, newest first
    pub async fn list_all(&self) -> Result<Vec<Demand>, DemandError> {
        Ok(self.demands.find(DemandQuery::all()).await?)
    }

    /// Demands submitted by one member, newest first
    pub async fn list_for_member(&self, member_id: ProfileId) -> Result<Vec<Demand>, DemandError> {
        Ok(self.demands.find(DemandQuery::by_member(member_id)).await?)
    }

    /// Demands in one status, newest first
    pub async fn list_by_status(&self, status: DemandStatus) -> Result<Vec<Demand>, DemandError> {
        Ok(self.demands.find(DemandQuery::by_status(status)).await?)
    }

    /// Demands visible to a caller, per the role visibility table
    pub async fn list_for_role(
        &self,
        role: Role,
        user_id: Option<ProfileId>,
    ) -> Result<Vec<Demand>, DemandError> {
        match DemandScope::for_role(role, user_id).to_query() {
            Some(query) => Ok(self.demands.find(query).await?),
            None => Ok(Vec::new()),
        }
    }
}

fn not_found_as_domain(id: DemandId) -> impl FnOnce(PortError) -> DemandError {
    move |error| {
        if error.is_not_found() {
            DemandError::NotFound(id)
        } else {
            DemandError::Persistence(error)
        }
    }
}
