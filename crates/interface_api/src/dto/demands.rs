//! Demand DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_demands::{Demand, NewDemand};
use domain_documents::DocumentRef;

use crate::dto::upload::UploadPayload;
use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDemandRequest {
    #[validate(length(min = 1, message = "service type is required"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "beneficiary name is required"))]
    pub beneficiary_name: String,
    #[serde(default)]
    pub beneficiary_relation: String,
    pub amount: Option<Decimal>,
    pub event_date: Option<NaiveDate>,
    pub justification_document: Option<UploadPayload>,
}

impl CreateDemandRequest {
    pub fn into_draft(self) -> Result<NewDemand, ApiError> {
        let justification_document = self
            .justification_document
            .map(UploadPayload::into_file_upload)
            .transpose()?;

        Ok(NewDemand {
            service_type: self.service_type,
            beneficiary_name: self.beneficiary_name,
            beneficiary_relation: self.beneficiary_relation,
            amount: self.amount,
            event_date: self.event_date,
            justification_document,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDemandStatusRequest {
    /// Target status wire name ("acceptee", "rejetee", "validee")
    pub status: String,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DemandResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub service_type: String,
    pub beneficiary_name: String,
    pub beneficiary_relation: String,
    pub amount: Option<Decimal>,
    pub event_date: Option<NaiveDate>,
    pub justification_document: Option<DocumentRef>,
    pub status: String,
    pub comment: Option<String>,
    pub controller_id: Option<Uuid>,
    pub controller_name: Option<String>,
    pub processing_date: Option<NaiveDate>,
    pub administrator_id: Option<Uuid>,
    pub administrator_name: Option<String>,
    pub validation_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Demand> for DemandResponse {
    fn from(demand: Demand) -> Self {
        Self {
            id: demand.id.into(),
            member_id: demand.member_id.into(),
            member_name: demand.member_name,
            service_type: demand.service_type,
            beneficiary_name: demand.beneficiary_name,
            beneficiary_relation: demand.beneficiary_relation,
            amount: demand.amount,
            event_date: demand.event_date,
            justification_document: demand.justification_document,
            status: demand.status.as_str().to_string(),
            comment: demand.comment,
            controller_id: demand.controller_id.map(Into::into),
            controller_name: demand.controller_name,
            processing_date: demand.processing_date,
            administrator_id: demand.administrator_id.map(Into::into),
            administrator_name: demand.administrator_name,
            validation_date: demand.validation_date,
            created_at: demand.created_at,
        }
    }
}
