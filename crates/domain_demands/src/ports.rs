//! Demand pipeline ports
//!
//! Persistence seams for the `demands` and `notifications` collections.
//! Implementations: PostgreSQL (`infra_db`) and the in-memory mocks below.

use async_trait::async_trait;

use core_kernel::{DemandId, DomainPort, PortError, ProfileId};

use crate::demand::{Demand, DemandStatus};
use crate::notification::Notification;

/// Query parameters for filtering demands
///
/// Results are always ordered newest-created first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemandQuery {
    /// Filter by submitting member
    pub member_id: Option<ProfileId>,
    /// Filter by pipeline status
    pub status: Option<DemandStatus>,
}

impl DemandQuery {
    /// Matches every demand
    pub fn all() -> Self {
        Self::default()
    }

    /// Demands submitted by one member
    pub fn by_member(member_id: ProfileId) -> Self {
        Self {
            member_id: Some(member_id),
            ..Self::default()
        }
    }

    /// Demands in one status
    pub fn by_status(status: DemandStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Port for demand persistence
#[async_trait]
pub trait DemandPort: DomainPort {
    /// Retrieves a demand by id
    async fn get(&self, id: DemandId) -> Result<Demand, PortError>;

    /// Demands matching the query, newest-created first
    async fn find(&self, query: DemandQuery) -> Result<Vec<Demand>, PortError>;

    /// Persists a new submission
    async fn insert(&self, demand: &Demand) -> Result<(), PortError>;

    /// Writes back a transitioned demand
    async fn update(&self, demand: &Demand) -> Result<(), PortError>;

    /// Hard delete, unconditional
    async fn delete(&self, id: DemandId) -> Result<(), PortError>;
}

/// Port for the notification collaborator
#[async_trait]
pub trait NotificationPort: DomainPort {
    /// Enqueues a notification record
    async fn create(&self, notification: &Notification) -> Result<(), PortError>;
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

    /// In-memory mock implementation of DemandPort
    #[derive(Debug, Default)]
    pub struct MockDemandPort {
        demands: Arc<RwLock<HashMap<DemandId, Demand>>>,
    }

    impl MockDemandPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with demands for testing
        pub async fn with_demands(demands: Vec<Demand>) -> Self {
            let port = Self::new();
            for demand in demands {
                port.demands.write().await.insert(demand.id, demand);
            }
            port
        }

        pub async fn len(&self) -> usize {
            self.demands.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.demands.read().await.is_empty()
        }
    }

    impl DomainPort for MockDemandPort {}

    #[async_trait]
    impl DemandPort for MockDemandPort {
        async fn get(&self, id: DemandId) -> Result<Demand, PortError> {
            self.demands
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Demand", id))
        }

        async fn find(&self, query: DemandQuery) -> Result<Vec<Demand>, PortError> {
            let demands = self.demands.read().await;
            let mut result: Vec<_> = demands
                .values()
                .filter(|d| {
                    if let Some(member_id) = query.member_id {
                        if d.member_id != member_id {
                            return false;
                        }
                    }
                    if let Some(status) = query.status {
                        if d.status != status {
                            return false;
                        }
                    }
                    true
                })
                .cloned()
                .collect();

            result.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| Uuid::from(b.id).cmp(&Uuid::from(a.id)))
            });
            Ok(result)
        }

        async fn insert(&self, demand: &Demand) -> Result<(), PortError> {
            let mut demands = self.demands.write().await;
            if demands.contains_key(&demand.id) {
                return Err(PortError::Conflict {
                    message: format!("demand {} already exists", demand.id),
                });
            }
            demands.insert(demand.id, demand.clone());
            Ok(())
        }

        async fn update(&self, demand: &Demand) -> Result<(), PortError> {
            let mut demands = self.demands.write().await;
            if !demands.contains_key(&demand.id) {
                return Err(PortError::not_found("Demand", demand.id));
            }
            demands.insert(demand.id, demand.clone());
            Ok(())
        }

        async fn delete(&self, id: DemandId) -> Result<(), PortError> {
            let mut demands = self.demands.write().await;
            if demands.remove(&id).is_none() {
                return Err(PortError::not_found("Demand", id));
            }
            Ok(())
        }
    }

    /// In-memory mock implementation of NotificationPort
    ///
    /// Can be switched into a failing mode to verify that notification
    /// failures stay best-effort.
    #[derive(Debug, Default)]
    pub struct MockNotificationPort {
        sent: Arc<RwLock<Vec<Notification>>>,
        failing: AtomicBool,
    }

    impl MockNotificationPort {
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

        pub async fn sent(&self) -> Vec<Notification> {
            self.sent.read().await.clone()
        }

        pub async fn sent_count(&self) -> usize {
            self.sent.read().await.len()
        }
    }

    impl DomainPort for MockNotificationPort {}

    #[async_trait]
    impl NotificationPort for MockNotificationPort {
        async fn create(&self, notification: &Notification) -> Result<(), PortError> {
            if self.failing.load(Ordering::Relaxed) {
                return Err(PortError::ServiceUnavailable {
                    service: "mock-notifications".to_string(),
                });
            }
            self.sent.write().await.push(notification.clone());
            Ok(())
        }
    }
}
