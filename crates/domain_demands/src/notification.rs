//! Notification records
//!
//! A notification is a demand-adjacent row picked up asynchronously by the
//! portal; nothing is delivered synchronously. Writes are best-effort: a
//! failed notification never rolls back the demand it announces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DemandId, NotificationId, ProfileId};

use crate::demand::Demand;

/// A pending message for a portal user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: ProfileId,
    pub title: String,
    pub body: String,
    /// Demand this notification refers to, if any
    pub demand_id: Option<DemandId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        recipient_id: ProfileId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new_v7(),
            recipient_id,
            title: title.into(),
            body: body.into(),
            demand_id: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Confirmation sent to the member right after submission
    pub fn demand_submitted(demand: &Demand) -> Self {
        let mut notification = Self::new(
            demand.member_id,
            "Demande enregistrée",
            format!(
                "Votre demande de prestation « {} » a été enregistrée et transmise au contrôle.",
                demand.service_type
            ),
        );
        notification.demand_id = Some(demand.id);
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{Demand, SubmittedFields};

    #[test]
    fn test_demand_submitted_targets_the_member() {
        let demand = Demand::submit(
            ProfileId::new(),
            "Koffi Agbodjan",
            SubmittedFields {
                service_type: "allocation naissance".to_string(),
                beneficiary_name: "Ama Agbodjan".to_string(),
                beneficiary_relation: "enfant".to_string(),
                amount: None,
                event_date: None,
            },
            None,
        );

        let notification = Notification::demand_submitted(&demand);

        assert_eq!(notification.recipient_id, demand.member_id);
        assert_eq!(notification.demand_id, Some(demand.id));
        assert!(!notification.read);
        assert!(notification.body.contains("allocation naissance"));
    }
}
