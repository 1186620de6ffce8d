//! Infrastructure Database Layer
//!
//! PostgreSQL adapters for the domain ports, implemented with SQLx over the
//! `demands`, `family_members`, `profiles`, `notifications`, and
//! `audit_logs` collections.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: each repository owns a pool
//! handle and implements one domain port, hiding SQL from the domain layer.
//! Queries use the runtime-checked SQLx API so the workspace builds without
//! a live `DATABASE_URL`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgDemandRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/mutuelle")).await?;
//! let demands = PgDemandRepository::new(pool.clone());
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use repositories::{
    PgAuditRepository, PgDemandRepository, PgFamilyRepository, PgNotificationRepository,
    PgProfileRepository,
};
