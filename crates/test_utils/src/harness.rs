//! In-memory service harness
//!
//! Wires the three application services over mock ports so tests exercise
//! the full service layer without PostgreSQL or the blob store. Handles to
//! every mock stay accessible for assertions and failure injection.

use std::sync::Arc;

use domain_demands::{DemandService, MockDemandPort, MockNotificationPort};
use domain_documents::{AttachmentService, MockStoragePort};
use domain_family::{FamilyService, MockFamilyPort};
use domain_profile::{MockAuditPort, MockProfilePort, ProfileService};

/// The full service layer over in-memory collaborators
pub struct InMemoryServices {
    pub demands: DemandService,
    pub family: FamilyService,
    pub profiles: ProfileService,

    pub demand_port: Arc<MockDemandPort>,
    pub notification_port: Arc<MockNotificationPort>,
    pub family_port: Arc<MockFamilyPort>,
    pub profile_port: Arc<MockProfilePort>,
    pub audit_port: Arc<MockAuditPort>,
    pub storage: Arc<MockStoragePort>,
}

impl InMemoryServices {
    /// Builds a fresh harness with empty stores
    pub fn new() -> Self {
        let demand_port = Arc::new(MockDemandPort::new());
        let notification_port = Arc::new(MockNotificationPort::new());
        let family_port = Arc::new(MockFamilyPort::new());
        let profile_port = Arc::new(MockProfilePort::new());
        let audit_port = Arc::new(MockAuditPort::new());
        let storage = Arc::new(MockStoragePort::new());

        let attachments = AttachmentService::new(storage.clone());

        Self {
            demands: DemandService::new(
                demand_port.clone(),
                notification_port.clone(),
                attachments.clone(),
            ),
            family: FamilyService::new(family_port.clone(), attachments),
            profiles: ProfileService::new(profile_port.clone(), audit_port.clone()),
            demand_port,
            notification_port,
            family_port,
            profile_port,
            audit_port,
            storage,
        }
    }
}

impl Default for InMemoryServices {
    fn default() -> Self {
        Self::new()
    }
}
