//! Notification repository
//!
//! Database access for the `notifications` collection, implementing
//! `domain_demands::NotificationPort`. Writes are best-effort on the caller
//! side; this repository just reports failures honestly.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, PortError};
use domain_demands::{Notification, NotificationPort};

use crate::error::classify;

/// Repository for managing notification rows
#[derive(Debug, Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgNotificationRepository {}

#[async_trait]
impl NotificationPort for PgNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, title, body, demand_id, is_read, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::from(notification.id))
        .bind(Uuid::from(notification.recipient_id))
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(notification.demand_id.map(Uuid::from))
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }
}
