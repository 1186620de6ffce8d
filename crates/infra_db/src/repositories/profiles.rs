//! Profile repository
//!
//! Database access for the `profiles` collection, implementing
//! `domain_profile::ProfilePort`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, PortError, ProfileId, Role};
use domain_profile::{Profile, ProfilePort};

use crate::error::{classify, DatabaseError};

const PROFILE_COLUMNS: &str =
    "id, email, first_name, last_name, role, is_active, phone, created_at";

/// Repository for managing profile rows
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a profile
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
    is_active: bool,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DatabaseError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|_| DatabaseError::SerializationError(format!("bad role: {}", row.role)))?;

        Ok(Profile {
            id: row.id.into(),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role,
            is_active: row.is_active,
            phone: row.phone,
            created_at: row.created_at,
        })
    }
}

impl DomainPort for PgProfileRepository {}

#[async_trait]
impl ProfilePort for PgProfileRepository {
    async fn get(&self, id: ProfileId) -> Result<Profile, PortError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| PortError::not_found("Profile", id))?;

        Ok(Profile::try_from(row)?)
    }

    async fn all(&self) -> Result<Vec<Profile>, PortError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        rows.into_iter()
            .map(|row| Profile::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn insert(&self, profile: &Profile) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, email, first_name, last_name, role, is_active, phone, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::from(profile.id))
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.role.as_str())
        .bind(profile.is_active)
        .bind(&profile.phone)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                email = $2,
                first_name = $3,
                last_name = $4,
                role = $5,
                is_active = $6,
                phone = $7
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(profile.id))
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.role.as_str())
        .bind(profile.is_active)
        .bind(&profile.phone)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Profile", profile.id));
        }
        Ok(())
    }

    async fn delete(&self, id: ProfileId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Profile", id));
        }
        Ok(())
    }
}
