//! Profile administration handlers
//!
//! User management is administrator territory; a user may read their own
//! profile.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ProfileId, Role};

use crate::dto::profiles::{CreateProfileRequest, ProfileResponse, UpdateProfileRequest};
use crate::error::ApiError;
use crate::identity::Identity;
use crate::AppState;

/// Lists every profile
pub async fn list_profiles(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    identity.require_role(Role::Administrator)?;

    let profiles = state.profiles.all().await?;
    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

/// Gets one profile (self, or any as administrator)
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let id = ProfileId::from(id);
    if id != identity.user_id {
        identity.require_role(Role::Administrator)?;
    }

    let profile = state.profiles.get(id).await?;
    Ok(Json(profile.into()))
}

/// Creates a profile
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    identity.require_role(Role::Administrator)?;
    request.validate()?;

    let profile = state.profiles.create(request.into_draft()?).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// Applies a partial update to a profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    identity.require_role(Role::Administrator)?;

    let profile = state
        .profiles
        .update(ProfileId::from(id), request.into_patch()?)
        .await?;
    Ok(Json(profile.into()))
}

/// Activates a user
pub async fn activate_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    identity.require_role(Role::Administrator)?;

    let profile = state.profiles.activate(ProfileId::from(id)).await?;
    Ok(Json(profile.into()))
}

/// Suspends a user
pub async fn suspend_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    identity.require_role(Role::Administrator)?;

    let profile = state.profiles.suspend(ProfileId::from(id)).await?;
    Ok(Json(profile.into()))
}

/// Deletes a profile
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    identity.require_role(Role::Administrator)?;

    state.profiles.delete(ProfileId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
