//! Demand Lifecycle Domain
//!
//! A demand is a member's request for a benefit payout. It moves through a
//! two-stage review pipeline:
//!
//! ```text
//! en_attente --(controller accepts)--> acceptee
//! en_attente --(controller rejects)--> rejetee
//! acceptee   --(administrator validates)--> validee
//! acceptee   --(administrator rejects)--> rejetee
//! ```
//!
//! `rejetee` and `validee` are terminal. Controller transitions stamp the
//! controller fields, administrator transitions the administrator fields; a
//! demand that went through both stages carries both sets.
//!
//! Visibility over the pipeline is role-scoped: members see their own
//! demands, controllers see everything, administrators see the queue of
//! accepted demands awaiting a final decision.

pub mod demand;
pub mod service;
pub mod visibility;
pub mod notification;
pub mod ports;
pub mod error;

pub use demand::{Demand, DemandStatus, NewDemand, Reviewer};
pub use service::DemandService;
pub use visibility::DemandScope;
pub use notification::Notification;
pub use ports::{DemandPort, DemandQuery, NotificationPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockDemandPort, MockNotificationPort};
pub use error::DemandError;
