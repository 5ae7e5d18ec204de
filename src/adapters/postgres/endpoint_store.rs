//! PostgreSQL implementation of EndpointStore.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::endpoint::{Endpoint, HttpMethod, TargetUrl};
use crate::domain::foundation::{DomainError, EndpointId, Timestamp, UserId};
use crate::ports::EndpointStore;

/// PostgreSQL implementation of EndpointStore.
#[derive(Clone)]
pub struct PostgresEndpointStore {
    pool: PgPool,
}

impl PostgresEndpointStore {
    /// Creates a new PostgresEndpointStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EndpointStore for PostgresEndpointStore {
    async fn create(&self, endpoint: &Endpoint) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO webhook_endpoints (id, owner_id, target, method, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(endpoint.id().as_uuid())
        .bind(endpoint.owner_id().as_str())
        .bind(endpoint.target().as_str())
        .bind(endpoint.method().as_str())
        .bind(endpoint.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert endpoint: {}", e)))?;

        Ok(())
    }

    async fn get_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, target, method, created_at
            FROM webhook_endpoints
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch endpoint: {}", e)))?;

        row.map(row_to_endpoint).transpose()
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Endpoint>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, target, method, created_at
            FROM webhook_endpoints
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list endpoints: {}", e)))?;

        rows.into_iter().map(row_to_endpoint).collect()
    }

    async fn delete(&self, owner_id: &UserId, id: EndpointId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM webhook_endpoints
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to delete endpoint: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Reconstitutes an endpoint from a row.
///
/// Stored rows were validated at write time; a row that no longer parses
/// indicates corruption and surfaces as a database error.
fn row_to_endpoint(row: PgRow) -> Result<Endpoint, DomainError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| DomainError::database(format!("Bad endpoint id column: {}", e)))?;
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| DomainError::database(format!("Bad owner_id column: {}", e)))?;
    let target: String = row
        .try_get("target")
        .map_err(|e| DomainError::database(format!("Bad target column: {}", e)))?;
    let method: String = row
        .try_get("method")
        .map_err(|e| DomainError::database(format!("Bad method column: {}", e)))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::database(format!("Bad created_at column: {}", e)))?;

    Ok(Endpoint::from_parts(
        EndpointId::from_uuid(id),
        UserId::new(owner_id).map_err(DomainError::from)?,
        TargetUrl::parse(&target)
            .map_err(|e| DomainError::database(format!("Stored target no longer valid: {}", e)))?,
        method
            .parse::<HttpMethod>()
            .map_err(|e| DomainError::database(format!("Stored method no longer valid: {}", e)))?,
        Timestamp::from_datetime(created_at),
    ))
}
