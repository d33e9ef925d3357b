//! Log repository for the append-only audit trail

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::LogEntry;
use crate::core::db::store::StoreError;

/// Log repository for database operations
#[derive(Clone)]
pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    /// Create a new log repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry for a user. Unknown users fail the foreign key.
    pub async fn append(&self, user_id: Uuid, description: &str) -> Result<LogEntry, StoreError> {
        sqlx::query_as::<_, LogEntry>(
            r#"
            INSERT INTO logs (user_id, description)
            VALUES ($1, $2)
            RETURNING id, user_id, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)
    }

}
