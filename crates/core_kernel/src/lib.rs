//! Core Kernel - Foundational types and utilities for the society management system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for domain entities
//! - The shared error taxonomy
//! - Port abstractions for external collaborators (persistence, storage, audit)

pub mod identifiers;
pub mod error;
pub mod ports;
pub mod roles;

pub use identifiers::{
    ProfileId, FamilyMemberId, DemandId, NotificationId, AuditEventId,
};
pub use error::CoreError;
pub use roles::{Role, UnknownRole};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    CircuitBreakerConfig,
};
