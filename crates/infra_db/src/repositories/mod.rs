//! Repository implementations of the domain ports

pub mod demands;
pub mod family;
pub mod profiles;
pub mod notifications;
pub mod audit;

pub use demands::PgDemandRepository;
pub use family::PgFamilyRepository;
pub use profiles::PgProfileRepository;
pub use notifications::PgNotificationRepository;
pub use audit::PgAuditRepository;
