//! Demand handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{DemandId, Role};
use domain_demands::{DemandStatus, Reviewer};

use crate::dto::demands::{CreateDemandRequest, DemandResponse, UpdateDemandStatusRequest};
use crate::error::ApiError;
use crate::identity::Identity;
use crate::AppState;

/// Submits a new demand for the authenticated member
pub async fn create_demand(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateDemandRequest>,
) -> Result<(StatusCode, Json<DemandResponse>), ApiError> {
    request.validate()?;

    let draft = request.into_draft()?;
    let demand = state
        .demands
        .create(identity.user_id, identity.name.clone(), draft)
        .await?;

    Ok((StatusCode::CREATED, Json(demand.into())))
}

/// Lists the demands visible to the caller's role
///
/// An unrecognised role sees an empty list, not an error.
pub async fn list_demands(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<DemandResponse>>, ApiError> {
    let demands = match identity.role {
        Some(role) => {
            state
                .demands
                .list_for_role(role, Some(identity.user_id))
                .await?
        }
        None => Vec::new(),
    };

    Ok(Json(demands.into_iter().map(Into::into).collect()))
}

/// Gets a demand by id
pub async fn get_demand(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<DemandResponse>, ApiError> {
    let demand = state.demands.get(DemandId::from(id)).await?;

    // Members only see their own submissions
    if identity.role == Some(Role::Member) && demand.member_id != identity.user_id {
        return Err(ApiError::Forbidden("not your demand".to_string()));
    }

    Ok(Json(demand.into()))
}

/// Applies a reviewer decision
///
/// First-stage moves (out of `en_attente`) are controller territory,
/// final-stage moves (out of `acceptee`) administrator territory.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDemandStatusRequest>,
) -> Result<Json<DemandResponse>, ApiError> {
    identity.require_reviewer()?;

    let target: DemandStatus = request
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown status: {}", request.status)))?;

    let id = DemandId::from(id);
    let current = state.demands.get(id).await?;
    match current.status {
        DemandStatus::Pending => {
            identity.require_role(Role::Controller)?;
        }
        DemandStatus::Accepted => {
            identity.require_role(Role::Administrator)?;
        }
        // Terminal; let the transition itself refuse with a conflict
        _ => {}
    }

    let reviewer = Reviewer::new(identity.user_id, identity.name.clone());
    let demand = state
        .demands
        .update_status(id, target, reviewer, request.comment)
        .await?;

    Ok(Json(demand.into()))
}

/// Deletes a demand
pub async fn delete_demand(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    identity.require_role(Role::Administrator)?;

    state.demands.delete(DemandId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
