//! Family member repository
//!
//! Database access for the `family_members` collection, implementing
//! `domain_family::FamilyPort`. Column names keep the portal's historical
//! schema (`member_of_user_id`, `npi`).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, FamilyMemberId, PortError, ProfileId};
use domain_documents::DocumentRef;
use domain_family::{FamilyMember, FamilyPort, Relation};

use crate::error::{classify, DatabaseError};

const FAMILY_COLUMNS: &str = "id, member_of_user_id, first_name, last_name, npi, \
     birth_certificate_ref, date_of_birth, relation, justification_document, created_at";

/// Repository for managing family member rows
#[derive(Debug, Clone)]
pub struct PgFamilyRepository {
    pool: PgPool,
}

impl PgFamilyRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a family member
#[derive(Debug, Clone, sqlx::FromRow)]
struct FamilyMemberRow {
    id: Uuid,
    member_of_user_id: Uuid,
    first_name: String,
    last_name: String,
    npi: String,
    birth_certificate_ref: String,
    date_of_birth: NaiveDate,
    relation: String,
    justification_document: Option<Json<DocumentRef>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FamilyMemberRow> for FamilyMember {
    type Error = DatabaseError;

    fn try_from(row: FamilyMemberRow) -> Result<Self, Self::Error> {
        let relation: Relation = row.relation.parse().map_err(|_| {
            DatabaseError::SerializationError(format!("bad relation: {}", row.relation))
        })?;

        Ok(FamilyMember {
            id: row.id.into(),
            owner_id: row.member_of_user_id.into(),
            first_name: row.first_name,
            last_name: row.last_name,
            national_id: row.npi,
            birth_certificate_ref: row.birth_certificate_ref,
            date_of_birth: row.date_of_birth,
            relation,
            justification_document: row.justification_document.map(|Json(doc)| doc),
            created_at: row.created_at,
        })
    }
}

impl DomainPort for PgFamilyRepository {}

#[async_trait]
impl FamilyPort for PgFamilyRepository {
    async fn list_for_owner(&self, owner_id: ProfileId) -> Result<Vec<FamilyMember>, PortError> {
        let sql = format!(
            "SELECT {FAMILY_COLUMNS} FROM family_members \
             WHERE member_of_user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, FamilyMemberRow>(&sql)
            .bind(Uuid::from(owner_id))
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        rows.into_iter()
            .map(|row| FamilyMember::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn get(&self, id: FamilyMemberId) -> Result<FamilyMember, PortError> {
        let sql = format!("SELECT {FAMILY_COLUMNS} FROM family_members WHERE id = $1");
        let row = sqlx::query_as::<_, FamilyMemberRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| PortError::not_found("FamilyMember", id))?;

        Ok(FamilyMember::try_from(row)?)
    }

    async fn insert(&self, member: &FamilyMember) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO family_members (
                id, member_of_user_id, first_name, last_name, npi,
                birth_certificate_ref, date_of_birth, relation,
                justification_document, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::from(member.id))
        .bind(Uuid::from(member.owner_id))
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.national_id)
        .bind(&member.birth_certificate_ref)
        .bind(member.date_of_birth)
        .bind(member.relation.as_str())
        .bind(member.justification_document.clone().map(Json))
        .bind(member.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }

    async fn update(&self, member: &FamilyMember) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE family_members SET
                first_name = $2,
                last_name = $3,
                npi = $4,
                birth_certificate_ref = $5,
                date_of_birth = $6,
                relation = $7,
                justification_document = $8
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(member.id))
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.national_id)
        .bind(&member.birth_certificate_ref)
        .bind(member.date_of_birth)
        .bind(member.relation.as_str())
        .bind(member.justification_document.clone().map(Json))
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("FamilyMember", member.id));
        }
        Ok(())
    }

    async fn delete(&self, id: FamilyMemberId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM family_members WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("FamilyMember", id));
        }
        Ok(())
    }
}
