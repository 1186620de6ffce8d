//! Demand repository
//!
//! Database access for the `demands` collection, implementing
//! `domain_demands::DemandPort`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use core_kernel::{DemandId, DomainPort, PortError};
use domain_demands::{Demand, DemandPort, DemandQuery, DemandStatus};
use domain_documents::DocumentRef;

use crate::error::{classify, DatabaseError};

const DEMAND_COLUMNS: &str = "id, member_id, member_name, service_type, beneficiary_name, \
     beneficiary_relation, amount, event_date, justification_document, status, comment, \
     controller_id, controller_name, processing_date, administrator_id, administrator_name, \
     validation_date, created_at";

/// Repository for managing demand rows
#[derive(Debug, Clone)]
pub struct PgDemandRepository {
    pool: PgPool,
}

impl PgDemandRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a demand
#[derive(Debug, Clone, sqlx::FromRow)]
struct DemandRow {
    id: Uuid,
    member_id: Uuid,
    member_name: String,
    service_type: String,
    beneficiary_name: String,
    beneficiary_relation: String,
    amount: Option<Decimal>,
    event_date: Option<NaiveDate>,
    justification_document: Option<Json<DocumentRef>>,
    status: String,
    comment: Option<String>,
    controller_id: Option<Uuid>,
    controller_name: Option<String>,
    processing_date: Option<NaiveDate>,
    administrator_id: Option<Uuid>,
    administrator_name: Option<String>,
    validation_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DemandRow> for Demand {
    type Error = DatabaseError;

    fn try_from(row: DemandRow) -> Result<Self, Self::Error> {
        let status: DemandStatus = row
            .status
            .parse()
            .map_err(|_| DatabaseError::SerializationError(format!("bad status: {}", row.status)))?;

        Ok(Demand {
            id: row.id.into(),
            member_id: row.member_id.into(),
            member_name: row.member_name,
            service_type: row.service_type,
            beneficiary_name: row.beneficiary_name,
            beneficiary_relation: row.beneficiary_relation,
            amount: row.amount,
            event_date: row.event_date,
            justification_document: row.justification_document.map(|Json(doc)| doc),
            status,
            comment: row.comment,
            controller_id: row.controller_id.map(Into::into),
            controller_name: row.controller_name,
            processing_date: row.processing_date,
            administrator_id: row.administrator_id.map(Into::into),
            administrator_name: row.administrator_name,
            validation_date: row.validation_date,
            created_at: row.created_at,
        })
    }
}

impl DomainPort for PgDemandRepository {}

#[async_trait]
impl DemandPort for PgDemandRepository {
    async fn get(&self, id: DemandId) -> Result<Demand, PortError> {
        let sql = format!("SELECT {DEMAND_COLUMNS} FROM demands WHERE id = $1");
        let row = sqlx::query_as::<_, DemandRow>(&sql)
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| PortError::not_found("Demand", id))?;

        Ok(Demand::try_from(row)?)
    }

    async fn find(&self, query: DemandQuery) -> Result<Vec<Demand>, PortError> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {DEMAND_COLUMNS} FROM demands WHERE TRUE"));

        if let Some(member_id) = query.member_id {
            builder.push(" AND member_id = ");
            builder.push_bind(Uuid::from(member_id));
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<DemandRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        rows.into_iter()
            .map(|row| Demand::try_from(row).map_err(PortError::from))
            .collect()
    }

    async fn insert(&self, demand: &Demand) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO demands (
                id, member_id, member_name, service_type, beneficiary_name,
                beneficiary_relation, amount, event_date, justification_document,
                status, comment, controller_id, controller_name, processing_date,
                administrator_id, administrator_name, validation_date, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18
            )
            "#,
        )
        .bind(Uuid::from(demand.id))
        .bind(Uuid::from(demand.member_id))
        .bind(&demand.member_name)
        .bind(&demand.service_type)
        .bind(&demand.beneficiary_name)
        .bind(&demand.beneficiary_relation)
        .bind(demand.amount)
        .bind(demand.event_date)
        .bind(demand.justification_document.clone().map(Json))
        .bind(demand.status.as_str())
        .bind(&demand.comment)
        .bind(demand.controller_id.map(Uuid::from))
        .bind(&demand.controller_name)
        .bind(demand.processing_date)
        .bind(demand.administrator_id.map(Uuid::from))
        .bind(&demand.administrator_name)
        .bind(demand.validation_date)
        .bind(demand.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(())
    }

    async fn update(&self, demand: &Demand) -> Result<(), PortError> {
        let result = sqlx::query(
            r#"
            UPDATE demands SET
                member_name = $2,
                service_type = $3,
                beneficiary_name = $4,
                beneficiary_relation = $5,
                amount = $6,
                event_date = $7,
                justification_document = $8,
                status = $9,
                comment = $10,
                controller_id = $11,
                controller_name = $12,
                processing_date = $13,
                administrator_id = $14,
                administrator_name = $15,
                validation_date = $16
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(demand.id))
        .bind(&demand.member_name)
        .bind(&demand.service_type)
        .bind(&demand.beneficiary_name)
        .bind(&demand.beneficiary_relation)
        .bind(demand.amount)
        .bind(demand.event_date)
        .bind(demand.justification_document.clone().map(Json))
        .bind(demand.status.as_str())
        .bind(&demand.comment)
        .bind(demand.controller_id.map(Uuid::from))
        .bind(&demand.controller_name)
        .bind(demand.processing_date)
        .bind(demand.administrator_id.map(Uuid::from))
        .bind(&demand.administrator_name)
        .bind(demand.validation_date)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Demand", demand.id));
        }
        Ok(())
    }

    async fn delete(&self, id: DemandId) -> Result<(), PortError> {
        let result = sqlx::query("DELETE FROM demands WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Demand", id));
        }
        Ok(())
    }
}
