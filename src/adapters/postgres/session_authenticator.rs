//! PostgreSQL implementation of SessionAuthenticator.
//!
//! Resolves opaque session credentials against the `sessions` table, joined
//! to `users`. Expiry is enforced here so the relay core only ever sees a
//! live user or nothing: sessions die 14 days after creation or 24 hours
//! after last activity, whichever comes first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AuthError, SessionUser, Timestamp, UserId};
use crate::ports::SessionAuthenticator;

/// Absolute session lifetime: 14 days.
const SESSION_TIMEOUT_ABSOLUTE_SECS: i64 = 60 * 60 * 24 * 14;

/// Inactivity timeout: 24 hours since the session was last touched.
const SESSION_TIMEOUT_INACTIVITY_SECS: i64 = 60 * 60 * 24;

/// PostgreSQL implementation of SessionAuthenticator.
#[derive(Clone)]
pub struct PostgresSessionAuthenticator {
    pool: PgPool,
}

impl PostgresSessionAuthenticator {
    /// Creates a new PostgresSessionAuthenticator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionAuthenticator for PostgresSessionAuthenticator {
    async fn resolve(&self, credential: &str) -> Result<Option<SessionUser>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT u.id AS user_id, u.email, u.is_admin,
                   s.created_at, s.updated_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
            "#,
        )
        .bind(credential)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::store_unavailable(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::store_unavailable(e.to_string()))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| AuthError::store_unavailable(e.to_string()))?;

        // Expired sessions are indistinguishable from absent ones.
        if !session_is_live(
            Timestamp::from_datetime(created_at),
            Timestamp::from_datetime(updated_at),
            Timestamp::now(),
        ) {
            return Ok(None);
        }

        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| AuthError::store_unavailable(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::store_unavailable(e.to_string()))?;
        let is_admin: bool = row
            .try_get("is_admin")
            .map_err(|e| AuthError::store_unavailable(e.to_string()))?;

        let user_id =
            UserId::new(user_id).map_err(|e| AuthError::store_unavailable(e.to_string()))?;

        Ok(Some(SessionUser::new(user_id, email, is_admin)))
    }
}

/// Whether a session is still within both its absolute and inactivity windows.
fn session_is_live(created_at: Timestamp, updated_at: Timestamp, now: Timestamp) -> bool {
    let absolute_cutoff = now.minus_secs(SESSION_TIMEOUT_ABSOLUTE_SECS);
    let inactivity_cutoff = now.minus_secs(SESSION_TIMEOUT_INACTIVITY_SECS);
    absolute_cutoff.is_before(&created_at) && inactivity_cutoff.is_before(&updated_at)
}
