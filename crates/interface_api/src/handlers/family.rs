//! Family registry handlers
//!
//! All operations act on the authenticated member's own registry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;
use validator::Validate;

use core_kernel::FamilyMemberId;
use domain_family::Relation;

use crate::dto::family::{
    CreateFamilyMemberRequest, EligibilityResponse, FamilyMemberResponse,
    UpdateFamilyMemberRequest,
};
use crate::error::ApiError;
use crate::identity::Identity;
use crate::AppState;

/// Lists the caller's registered dependents
pub async fn list_family_members(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<FamilyMemberResponse>>, ApiError> {
    let members = state.family.list(identity.user_id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Registers a new dependent for the caller
pub async fn add_family_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateFamilyMemberRequest>,
) -> Result<(StatusCode, Json<FamilyMemberResponse>), ApiError> {
    request.validate()?;

    let draft = request.into_draft()?;
    let member = state.family.add(identity.user_id, draft).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Updates one of the caller's dependents
pub async fn update_family_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFamilyMemberRequest>,
) -> Result<Json<FamilyMemberResponse>, ApiError> {
    let id = FamilyMemberId::from(id);
    ensure_owner(&state, &identity, id).await?;

    let patch = request.into_patch()?;
    let member = state.family.update(id, patch).await?;

    Ok(Json(member.into()))
}

/// Removes one of the caller's dependents
pub async fn delete_family_member(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let id = FamilyMemberId::from(id);
    ensure_owner(&state, &identity, id).await?;

    state.family.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Probes whether the caller may register one more dependent of a relation
///
/// Unknown relation strings answer `can_add: false` rather than erroring.
pub async fn check_eligibility(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(relation): Path<String>,
) -> Result<Json<EligibilityResponse>, ApiError> {
    let can_add = match relation.parse::<Relation>() {
        Ok(parsed) => state.family.can_add_relation(identity.user_id, parsed).await?,
        Err(_) => false,
    };

    Ok(Json(EligibilityResponse { relation, can_add }))
}

async fn ensure_owner(
    state: &AppState,
    identity: &Identity,
    id: FamilyMemberId,
) -> Result<(), ApiError> {
    let member = state.family.get(id).await?;
    if member.owner_id != identity.user_id {
        return Err(ApiError::Forbidden("not your dependent".to_string()));
    }
    Ok(())
}
