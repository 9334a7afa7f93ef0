//! PostgreSQL implementation of RegistrationRepository.
//!
//! Payment columns are stored individually; the farmer form payload is
//! stored as JSONB so new form fields need no migration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId, Timestamp};
use crate::domain::registration::{FarmerDetails, PaymentStatus, Registration};
use crate::ports::RegistrationRepository;

/// PostgreSQL implementation of the RegistrationRepository port.
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a registration.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    details: Json<FarmerDetails>,
    order_id: Option<String>,
    payment_status: String,
    payment_id: Option<String>,
    signature: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i32,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let payment_status = PaymentStatus::parse(&row.payment_status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment_status value: {}", row.payment_status),
            )
        })?;

        Ok(Registration {
            id: RegistrationId::from_uuid(row.id),
            details: row.details.0,
            order_id: row.order_id,
            payment_status,
            payment_id: row.payment_id,
            signature: row.signature,
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            version: row.version,
        })
    }
}

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {} registration: {}", action, e),
    )
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn create(&self, registration: &Registration) -> Result<(), DomainError> {
        registration.details.validate_required()?;

        sqlx::query(
            r#"
            INSERT INTO registrations (
                id, details, order_id, payment_status, payment_id, signature,
                paid_at, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(Json(&registration.details))
        .bind(&registration.order_id)
        .bind(registration.payment_status.as_str())
        .bind(&registration.payment_id)
        .bind(&registration.signature)
        .bind(registration.paid_at.map(|t| *t.as_datetime()))
        .bind(registration.created_at.as_datetime())
        .bind(registration.updated_at.as_datetime())
        .bind(registration.version)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("save", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(
            r#"
            SELECT id, details, order_id, payment_status, payment_id, signature,
                   paid_at, created_at, updated_at, version
            FROM registrations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("fetch", e))?;

        row.map(Registration::try_from).transpose()
    }

    async fn update(&self, registration: &Registration) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE registrations SET
                details = $2,
                order_id = $3,
                payment_status = $4,
                payment_id = $5,
                signature = $6,
                paid_at = $7,
                updated_at = $8,
                version = version + 1
            WHERE id = $1 AND version = $9
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(Json(&registration.details))
        .bind(&registration.order_id)
        .bind(registration.payment_status.as_str())
        .bind(&registration.payment_id)
        .bind(&registration.signature)
        .bind(registration.paid_at.map(|t| *t.as_datetime()))
        .bind(registration.updated_at.as_datetime())
        .bind(registration.version)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update", e))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM registrations WHERE id = $1)")
                .bind(registration.id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| database_error("check", e))?;

        if exists {
            Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Registration {} changed since version {}",
                    registration.id, registration.version
                ),
            )
            .with_detail("registration_id", registration.id.to_string()))
        } else {
            Err(DomainError::new(
                ErrorCode::RegistrationNotFound,
                format!("Registration {} not found", registration.id),
            ))
        }
    }
}
