//! Profile and audit ports
//!
//! Persistence seams for the `profiles` and `audit_logs` collections.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, ProfileId};

use crate::audit::AuditEntry;
use crate::profile::Profile;

/// Port for profile persistence
#[async_trait]
pub trait ProfilePort: DomainPort {
    /// Retrieves a profile by id
    async fn get(&self, id: ProfileId) -> Result<Profile, PortError>;

    /// Every profile, newest first
    async fn all(&self) -> Result<Vec<Profile>, PortError>;

    /// Persists a new profile
    async fn insert(&self, profile: &Profile) -> Result<(), PortError>;

    /// Writes back a mutated profile
    async fn update(&self, profile: &Profile) -> Result<(), PortError>;

    /// Hard delete
    async fn delete(&self, id: ProfileId) -> Result<(), PortError>;
}

/// Port for the audit-trail collaborator
///
/// Writes are fire-and-forget from the caller's perspective: services log
/// and swallow failures.
#[async_trait]
pub trait AuditPort: DomainPort {
    /// Appends one entry to the trail
    async fn create_log(&self, entry: &AuditEntry) -> Result<(), PortError>;
}

/// Mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// In-memory mock implementation of ProfilePort
    #[derive(Debug, Default)]
    pub struct MockProfilePort {
        profiles: Arc<RwLock<HashMap<ProfileId, Profile>>>,
    }

    impl MockProfilePort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with profiles for testing
        pub async fn with_profiles(profiles: Vec<Profile>) -> Self {
            let port = Self::new();
            for profile in profiles {
                port.profiles.write().await.insert(profile.id, profile);
            }
            port
        }
    }

    impl DomainPort for MockProfilePort {}

    #[async_trait]
    impl ProfilePort for MockProfilePort {
        async fn get(&self, id: ProfileId) -> Result<Profile, PortError> {
            self.profiles
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Profile", id))
        }

        async fn all(&self) -> Result<Vec<Profile>, PortError> {
            let profiles = self.profiles.read().await;
            let mut result: Vec<_> = profiles.values().cloned().collect();
            result.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| Uuid::from(b.id).cmp(&Uuid::from(a.id)))
            });
            Ok(result)
        }

        async fn insert(&self, profile: &Profile) -> Result<(), PortError> {
            let mut profiles = self.profiles.write().await;
            if profiles.contains_key(&profile.id) {
                return Err(PortError::Conflict {
                    message: format!("profile {} already exists", profile.id),
                });
            }
            profiles.insert(profile.id, profile.clone());
            Ok(())
        }

        async fn update(&self, profile: &Profile) -> Result<(), PortError> {
            let mut profiles = self.profiles.write().await;
            if !profiles.contains_key(&profile.id) {
                return Err(PortError::not_found("Profile", profile.id));
            }
            profiles.insert(profile.id, profile.clone());
            Ok(())
        }

        async fn delete(&self, id: ProfileId) -> Result<(), PortError> {
            let mut profiles = self.profiles.write().await;
            if profiles.remove(&id).is_none() {
                return Err(PortError::not_found("Profile", id));
            }
            Ok(())
        }
    }

    /// In-memory mock implementation of AuditPort
    #[derive(Debug, Default)]
    pub struct MockAuditPort {
        entries: Arc<RwLock<Vec<AuditEntry>>>,
        failing: AtomicBool,
    }

    impl MockAuditPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            let port = Self::default();
            port.failing.store(true, Ordering::Relaxed);
            port
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::Relaxed);
        }

        pub async fn entries(&self) -> Vec<AuditEntry> {
            self.entries.read().await.clone()
        }

        pub async fn entry_count(&self) -> usize {
            self.entries.read().await.len()
        }
    }

    impl DomainPort for MockAuditPort {}

    #[async_trait]
    impl AuditPort for MockAuditPort {
        async fn create_log(&self, entry: &AuditEntry) -> Result<(), PortError> {
            if self.failing.load(Ordering::Relaxed) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-audit".to_string(),
                });
            }
            self.entries.write().await.push(entry.clone());
            Ok(())
        }
    }
}
