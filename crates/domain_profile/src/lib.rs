//! Profile Domain
//!
//! Portal users and their administration. Profiles are referenced by the
//! demand and family domains but owned here; the only business rule is the
//! activation toggle, and every mutation leaves an audit-trail entry
//! (fire-and-forget).

pub mod profile;
pub mod audit;
pub mod service;
pub mod ports;
pub mod error;

pub use profile::{NewProfile, Profile, ProfilePatch};
pub use audit::{AuditCategory, AuditEntry, AuditSeverity};
pub use service::ProfileService;
pub use ports::{AuditPort, ProfilePort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockAuditPort, MockProfilePort};
pub use error::ProfileError;
