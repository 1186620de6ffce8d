//! Family registry port
//!
//! Defines the persistence seam for the `family_members` collection.
//! Implementations: PostgreSQL (`infra_db`) and the in-memory mock below.

use async_trait::async_trait;

use core_kernel::{DomainPort, FamilyMemberId, PortError, ProfileId};

use crate::member::FamilyMember;

/// Port for family member persistence
#[async_trait]
pub trait FamilyPort: DomainPort {
    /// All dependents of one owner, newest registration first
    async fn list_for_owner(&self, owner_id: ProfileId) -> Result<Vec<FamilyMember>, PortError>;

    /// Retrieves a dependent by id
    async fn get(&self, id: FamilyMemberId) -> Result<FamilyMember, PortError>;

    /// Persists a new registration
    async fn insert(&self, member: &FamilyMember) -> Result<(), PortError>;

    /// Writes back a mutated registration
    async fn update(&self, member: &FamilyMember) -> Result<(), PortError>;

    /// Hard delete; attached blobs stay with the storage collaborator
    async fn delete(&self, id: FamilyMemberId) -> Result<(), PortError>;
}

/// Mock implementation of FamilyPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// In-memory mock implementation of FamilyPort
    #[derive(Debug, Default)]
    pub struct MockFamilyPort {
        members: Arc<RwLock<HashMap<FamilyMemberId, FamilyMember>>>,
    }

    impl MockFamilyPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with members for testing
        pub async fn with_members(members: Vec<FamilyMember>) -> Self {
            let port = Self::new();
            for member in members {
                port.members.write().await.insert(member.id, member);
            }
            port
        }

        /// Total count across all owners
        pub async fn len(&self) -> usize {
            self.members.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.members.read().await.is_empty()
        }
    }

    impl DomainPort for MockFamilyPort {}

    #[async_trait]
    impl FamilyPort for MockFamilyPort {
        async fn list_for_owner(
            &self,
            owner_id: ProfileId,
        ) -> Result<Vec<FamilyMember>, PortError> {
            let members = self.members.read().await;
            let mut result: Vec<_> = members
                .values()
                .filter(|m| m.owner_id == owner_id)
                .cloned()
                .collect();
            result.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| Uuid::from(b.id).cmp(&Uuid::from(a.id)))
            });
            Ok(result)
        }

        async fn get(&self, id: FamilyMemberId) -> Result<FamilyMember, PortError> {
            self.members
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("FamilyMember", id))
        }

        async fn insert(&self, member: &FamilyMember) -> Result<(), PortError> {
            let mut members = self.members.write().await;
            if members.contains_key(&member.id) {
                return Err(PortError::Conflict {
                    message: format!("family member {} already exists", member.id),
                });
            }
            members.insert(member.id, member.clone());
            Ok(())
        }

        async fn update(&self, member: &FamilyMember) -> Result<(), PortError> {
            let mut members = self.members.write().await;
            if !members.contains_key(&member.id) {
                return Err(PortError::not_found("FamilyMember", member.id));
            }
            members.insert(member.id, member.clone());
            Ok(())
        }

        async fn delete(&self, id: FamilyMemberId) -> Result<(), PortError> {
            let mut members = self.members.write().await;
            if members.remove(&id).is_none() {
                return Err(PortError::not_found("FamilyMember", id));
            }
            Ok(())
        }
    }
}
