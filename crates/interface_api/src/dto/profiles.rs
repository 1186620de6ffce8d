//! Profile DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Role;
use domain_profile::{NewProfile, Profile, ProfilePatch};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// Role wire name ("membre", "controleur", "administrateur")
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
    pub phone: Option<String>,
}

impl CreateProfileRequest {
    pub fn into_draft(self) -> Result<NewProfile, ApiError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("unknown role: {}", self.role)))?;

        Ok(NewProfile {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            is_active: self.is_active,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_patch(self) -> Result<ProfilePatch, ApiError> {
        let role = self
            .role
            .map(|r| {
                r.parse::<Role>()
                    .map_err(|_| ApiError::BadRequest(format!("unknown role: {r}")))
            })
            .transpose()?;

        Ok(ProfilePatch {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            is_active: self.is_active,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.into(),
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: profile.role.as_str().to_string(),
            is_active: profile.is_active,
            phone: profile.phone,
            created_at: profile.created_at,
        }
    }
}
