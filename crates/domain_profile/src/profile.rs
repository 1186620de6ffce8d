//! Profile aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ProfileId, Role};

/// A portal user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Suspended users keep their data but cannot act
    pub is_active: bool,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile from registration data
    pub fn create(draft: NewProfile) -> Self {
        Self {
            id: ProfileId::new_v7(),
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            role: draft.role,
            is_active: draft.is_active,
            phone: draft.phone,
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a partial update
    pub(crate) fn apply_patch(&mut self, patch: &ProfilePatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
    }
}

/// Registration data for a new profile
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub phone: Option<String>,
}

/// Partial update for a profile
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewProfile {
        NewProfile {
            email: "koffi@exemple.bj".to_string(),
            first_name: "Koffi".to_string(),
            last_name: "Agbodjan".to_string(),
            role: Role::Member,
            is_active: false,
            phone: None,
        }
    }

    #[test]
    fn test_create_assigns_id() {
        let profile = Profile::create(draft());
        assert!(profile.id.to_string().starts_with("USR-"));
        assert_eq!(profile.role, Role::Member);
        assert!(!profile.is_active);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Profile::create(draft()).full_name(), "Koffi Agbodjan");
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut profile = Profile::create(draft());

        profile.apply_patch(&ProfilePatch {
            role: Some(Role::Controller),
            ..Default::default()
        });

        assert_eq!(profile.role, Role::Controller);
        assert_eq!(profile.email, "koffi@exemple.bj");
        assert!(!profile.is_active);
    }
}
