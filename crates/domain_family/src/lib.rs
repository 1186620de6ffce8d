//! Family Registry Domain
//!
//! This crate manages the dependents a society member declares: spouses,
//! children, parents, and step-parents. Registration is bounded by the
//! relation cardinality rules in [`eligibility`]; each dependent may carry
//! one justification document bound through the attachment service.
//!
//! # Cardinality model
//!
//! Per owner: one spouse (across both spouse variants), one father, one
//! mother, one step-father, one step-mother, and at most six children.

pub mod relation;
pub mod eligibility;
pub mod member;
pub mod service;
pub mod ports;
pub mod error;

pub use relation::Relation;
pub use eligibility::{can_add_relation, quota, MAX_CHILDREN};
pub use member::{FamilyMember, FamilyMemberPatch, NewFamilyMember};
pub use service::FamilyService;
pub use ports::FamilyPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockFamilyPort;
pub use error::FamilyError;
