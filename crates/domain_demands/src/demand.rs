//! Demand aggregate

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{DemandId, ProfileId};
use domain_documents::{DocumentRef, FileUpload};

use crate::error::DemandError;

/// Demand status
///
/// Wire names keep the portal's historical French vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandStatus {
    /// Submitted, waiting for first-stage review
    #[serde(rename = "en_attente")]
    Pending,
    /// Accepted by a controller, awaiting final decision
    #[serde(rename = "acceptee")]
    Accepted,
    /// Rejected at either stage (terminal)
    #[serde(rename = "rejetee")]
    Rejected,
    /// Validated by an administrator (terminal)
    #[serde(rename = "validee")]
    Validated,
}

impl DemandStatus {
    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, DemandStatus::Rejected | DemandStatus::Validated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DemandStatus::Pending => "en_attente",
            DemandStatus::Accepted => "acceptee",
            DemandStatus::Rejected => "rejetee",
            DemandStatus::Validated => "validee",
        }
    }
}

impl fmt::Display for DemandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemandStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(DemandStatus::Pending),
            "acceptee" => Ok(DemandStatus::Accepted),
            "rejetee" => Ok(DemandStatus::Rejected),
            "validee" => Ok(DemandStatus::Validated),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error for status strings outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown demand status: {0}")]
pub struct UnknownStatus(pub String);

/// The reviewer performing a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    pub id: ProfileId,
    pub name: String,
}

impl Reviewer {
    pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Form data for a new demand
#[derive(Debug, Clone)]
pub struct NewDemand {
    pub service_type: String,
    pub beneficiary_name: String,
    /// Free-form tie between member and beneficiary ("lui-meme", "enfant", ...)
    pub beneficiary_relation: String,
    pub amount: Option<Decimal>,
    pub event_date: Option<NaiveDate>,
    pub justification_document: Option<FileUpload>,
}

/// A member's request for a benefit payout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    /// Unique identifier
    pub id: DemandId,
    /// Submitting member
    pub member_id: ProfileId,
    pub member_name: String,
    /// Benefit or service requested
    pub service_type: String,
    pub beneficiary_name: String,
    pub beneficiary_relation: String,
    /// Requested amount, when the benefit is monetary
    pub amount: Option<Decimal>,
    /// Date of the qualifying event (birth, marriage, hospitalization, ...)
    pub event_date: Option<NaiveDate>,
    /// Optional justification document held in the blob store
    pub justification_document: Option<DocumentRef>,
    /// Pipeline status
    pub status: DemandStatus,
    /// Reviewer comment from the latest decision
    pub comment: Option<String>,
    /// First-stage reviewer, set by controller transitions only
    pub controller_id: Option<ProfileId>,
    pub controller_name: Option<String>,
    pub processing_date: Option<NaiveDate>,
    /// Final-stage reviewer, set by administrator transitions only
    pub administrator_id: Option<ProfileId>,
    pub administrator_name: Option<String>,
    pub validation_date: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Demand {
    /// Creates a freshly submitted demand
    pub fn submit(
        member_id: ProfileId,
        member_name: impl Into<String>,
        form: SubmittedFields,
        document: Option<DocumentRef>,
    ) -> Self {
        Self {
            id: DemandId::new_v7(),
            member_id,
            member_name: member_name.into(),
            service_type: form.service_type,
            beneficiary_name: form.beneficiary_name,
            beneficiary_relation: form.beneficiary_relation,
            amount: form.amount,
            event_date: form.event_date,
            justification_document: document,
            status: DemandStatus::Pending,
            comment: None,
            controller_id: None,
            controller_name: None,
            processing_date: None,
            administrator_id: None,
            administrator_name: None,
            validation_date: None,
            created_at: Utc::now(),
        }
    }

    /// Checks if a transition is legal from the current status
    pub fn can_transition_to(&self, target: DemandStatus) -> bool {
        use DemandStatus::*;
        matches!(
            (self.status, target),
            (Pending, Accepted) | (Pending, Rejected) | (Accepted, Validated) | (Accepted, Rejected)
        )
    }

    /// Applies a reviewer decision
    ///
    /// Transitions out of `Pending` stamp the controller fields, transitions
    /// out of `Accepted` the administrator fields. Anything else - including
    /// any move out of a terminal status - fails and leaves the record
    /// unchanged.
    pub fn transition(
        &mut self,
        target: DemandStatus,
        reviewer: Reviewer,
        comment: Option<String>,
    ) -> Result<(), DemandError> {
        use DemandStatus::*;

        if !self.can_transition_to(target) {
            return Err(DemandError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }

        let today = Utc::now().date_naive();
        match self.status {
            Pending => {
                self.controller_id = Some(reviewer.id);
                self.controller_name = Some(reviewer.name);
                self.processing_date = Some(today);
            }
            Accepted => {
                self.administrator_id = Some(reviewer.id);
                self.administrator_name = Some(reviewer.name);
                self.validation_date = Some(today);
            }
            // can_transition_to already refused terminal origins
            Rejected | Validated => unreachable!("transition out of terminal status"),
        }

        if comment.is_some() {
            self.comment = comment;
        }
        self.status = target;
        Ok(())
    }
}

/// Scalar fields of a submission, after the document is resolved
#[derive(Debug, Clone)]
pub struct SubmittedFields {
    pub service_type: String,
    pub beneficiary_name: String,
    pub beneficiary_relation: String,
    pub amount: Option<Decimal>,
    pub event_date: Option<NaiveDate>,
}

impl NewDemand {
    pub(crate) fn into_parts(self) -> (SubmittedFields, Option<FileUpload>) {
        let NewDemand {
            service_type,
            beneficiary_name,
            beneficiary_relation,
            amount,
            event_date,
            justification_document,
        } = self;
        (
            SubmittedFields {
                service_type,
                beneficiary_name,
                beneficiary_relation,
                amount,
                event_date,
            },
            justification_document,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DemandStatus::Pending).unwrap(),
            "\"en_attente\""
        );
        assert_eq!(
            serde_json::to_string(&DemandStatus::Accepted).unwrap(),
            "\"acceptee\""
        );
        for status in [
            DemandStatus::Pending,
            DemandStatus::Accepted,
            DemandStatus::Rejected,
            DemandStatus::Validated,
        ] {
            assert_eq!(status.as_str().parse::<DemandStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(DemandStatus::Rejected.is_terminal());
        assert!(DemandStatus::Validated.is_terminal());
        assert!(!DemandStatus::Pending.is_terminal());
        assert!(!DemandStatus::Accepted.is_terminal());
    }
}
