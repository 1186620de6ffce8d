//! Profile administration service
//!
//! Profile mutations carry an audit side effect. The audit collaborator is
//! fire-and-forget: its failure is logged and never surfaces to the caller.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::{PortError, ProfileId};

use crate::audit::{AuditCategory, AuditEntry, AuditSeverity};
use crate::error::ProfileError;
use crate::ports::{AuditPort, ProfilePort};
use crate::profile::{NewProfile, Profile, ProfilePatch};

/// Application service for profile administration
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfilePort>,
    audit: Arc<dyn AuditPort>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfilePort>, audit: Arc<dyn AuditPort>) -> Self {
        Self { profiles, audit }
    }

    /// Retrieves one profile
    pub async fn get(&self, id: ProfileId) -> Result<Profile, ProfileError> {
        self.profiles.get(id).await.map_err(not_found_as_domain(id))
    }

    /// Every profile, newest first
    pub async fn all(&self) -> Result<Vec<Profile>, ProfileError> {
        Ok(self.profiles.all().await?)
    }

    /// Registers a new profile
    pub async fn create(&self, draft: NewProfile) -> Result<Profile, ProfileError> {
        if draft.email.trim().is_empty() {
            return Err(ProfileError::Validation("email is required".to_string()));
        }

        let profile = Profile::create(draft);
        self.profiles.insert(&profile).await?;
        info!(profile_id = %profile.id, role = %profile.role, "profile created");
        Ok(profile)
    }

    /// Applies a partial update and records it in the audit trail
    pub async fn update(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self.profiles.get(id).await.map_err(not_found_as_domain(id))?;

        profile.apply_patch(&patch);
        self.profiles.update(&profile).await?;

        self.record(AuditEntry::new(
            "Mise à jour profil",
            format!("Profil mis à jour pour l'utilisateur {id}"),
            AuditSeverity::Info,
            AuditCategory::Administration,
        ))
        .await;

        Ok(profile)
    }

    /// Turns a profile active
    pub async fn activate(&self, id: ProfileId) -> Result<Profile, ProfileError> {
        let profile = self.set_active(id, true).await?;

        self.record(AuditEntry::new(
            "Activation utilisateur",
            format!("Utilisateur {id} activé"),
            AuditSeverity::Success,
            AuditCategory::Administration,
        ))
        .await;

        Ok(profile)
    }

    /// Suspends a profile
    pub async fn suspend(&self, id: ProfileId) -> Result<Profile, ProfileError> {
        let profile = self.set_active(id, false).await?;

        self.record(AuditEntry::new(
            "Suspension utilisateur",
            format!("Utilisateur {id} suspendu"),
            AuditSeverity::Warning,
            AuditCategory::Administration,
        ))
        .await;

        Ok(profile)
    }

    /// Hard delete
    pub async fn delete(&self, id: ProfileId) -> Result<(), ProfileError> {
        self.profiles.delete(id).await.map_err(not_found_as_domain(id))?;
        info!(profile_id = %id, "profile deleted");
        Ok(())
    }

    async fn set_active(&self, id: ProfileId, is_active: bool) -> Result<Profile, ProfileError> {
        let mut profile = self.profiles.get(id).await.map_err(not_found_as_domain(id))?;
        profile.is_active = is_active;
        self.profiles.update(&profile).await?;
        Ok(profile)
    }

    async fn record(&self, entry: AuditEntry) {
        if let Err(error) = self.audit.create_log(&entry).await {
            warn!(title = %entry.title, %error, "audit write failed, operation kept");
        }
    }
}

fn not_found_as_domain(id: ProfileId) -> impl FnOnce(PortError) -> ProfileError {
    move |error| {
        if error.is_not_found() {
            ProfileError::NotFound(id)
        } else {
            ProfileError::Persistence(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Role;

    use crate::ports::mock::{MockAuditPort, MockProfilePort};

    struct Harness {
        service: ProfileService,
        audit: Arc<MockAuditPort>,
    }

    fn harness() -> Harness {
        let audit = Arc::new(MockAuditPort::new());
        let service = ProfileService::new(Arc::new(MockProfilePort::new()), audit.clone());
        Harness { service, audit }
    }

    fn draft(role: Role) -> NewProfile {
        NewProfile {
            email: "chantal@exemple.bj".to_string(),
            first_name: "Chantal".to_string(),
            last_name: "Hounsou".to_string(),
            role,
            is_active: false,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let h = harness();

        let created = h.service.create(draft(Role::Controller)).await.unwrap();
        let fetched = h.service.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.role, Role::Controller);
    }

    #[tokio::test]
    async fn test_create_requires_email() {
        let h = harness();
        let mut blank = draft(Role::Member);
        blank.email = "  ".to_string();

        assert!(matches!(
            h.service.create(blank).await,
            Err(ProfileError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_activate_sets_flag_and_audits_success() {
        let h = harness();
        let profile = h.service.create(draft(Role::Member)).await.unwrap();

        let activated = h.service.activate(profile.id).await.unwrap();

        assert!(activated.is_active);
        let entries = h.audit.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, AuditSeverity::Success);
        assert_eq!(entries[0].category, AuditCategory::Administration);
        assert_eq!(entries[0].title, "Activation utilisateur");
    }

    #[tokio::test]
    async fn test_suspend_audits_warning() {
        let h = harness();
        let profile = h.service.create(draft(Role::Member)).await.unwrap();
        h.service.activate(profile.id).await.unwrap();

        let suspended = h.service.suspend(profile.id).await.unwrap();

        assert!(!suspended.is_active);
        let entries = h.audit.entries().await;
        assert_eq!(entries.last().unwrap().severity, AuditSeverity::Warning);
    }

    #[tokio::test]
    async fn test_update_patches_and_audits_info() {
        let h = harness();
        let profile = h.service.create(draft(Role::Member)).await.unwrap();

        let updated = h
            .service
            .update(
                profile.id,
                ProfilePatch {
                    phone: Some("+229 97 00 11 22".to_string()),
                    role: Some(Role::Administrator),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone.as_deref(), Some("+229 97 00 11 22"));
        assert_eq!(updated.role, Role::Administrator);
        assert_eq!(updated.email, profile.email);

        let entries = h.audit.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, AuditSeverity::Info);
        assert_eq!(entries[0].title, "Mise à jour profil");
    }

    #[tokio::test]
    async fn test_audit_failure_never_fails_the_mutation() {
        let h = harness();
        let profile = h.service.create(draft(Role::Member)).await.unwrap();
        h.audit.set_failing(true);

        let activated = h.service.activate(profile.id).await.unwrap();

        assert!(activated.is_active);
        assert_eq!(h.audit.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_activate_unknown_profile_is_not_found() {
        let h = harness();
        assert!(matches!(
            h.service.activate(ProfileId::new()).await,
            Err(ProfileError::NotFound(_))
        ));
    }
}
