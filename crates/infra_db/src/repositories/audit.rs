//! Audit trail repository
//!
//! Database access for the `audit_logs` collection, implementing
//! `domain_profile::AuditPort`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, PortError};
use domain_profile::{AuditEntry, AuditPort};

use crate::error::classify;

/// Repository for appending audit trail rows
#[derive(Debug, Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgAuditRepository {}

#[async_trait]
impl AuditPort for PgAuditRepository {
    async fn create_log(&self, entry: &AuditEntry) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (
                id, title, message, severity, category, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::from(entry.id))
        .bind(&entry.title)
        .bind(&entry.message)
        .bind(entry.severity.as_str())
        .bind(entry.category.as_str())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }
}
