//! Shared test utilities for the society management test suite
//!
//! Provides data builders with sensible defaults, common fixtures, an
//! in-memory service harness over the mock ports, and assertion helpers.

pub mod builders;
pub mod fixtures;
pub mod harness;
pub mod assertions;

pub use builders::{TestDemandBuilder, TestFamilyMemberBuilder, TestProfileBuilder};
pub use fixtures::{IdFixtures, StringFixtures, TemporalFixtures};
pub use harness::InMemoryServices;
