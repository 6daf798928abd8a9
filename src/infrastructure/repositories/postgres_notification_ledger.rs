use super::map_sqlx;
use crate::application::{ApplicationResult, ports::notifications::NotificationLedger};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Claims live in `notification_deliveries`, keyed by `(event_id, reader_id)`.
#[derive(Clone)]
pub struct PostgresNotificationLedger {
    pool: PgPool,
}

impl PostgresNotificationLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationLedger for PostgresNotificationLedger {
    async fn claim(
        &self,
        event_id: Uuid,
        reader_id: UserId,
        at: DateTime<Utc>,
    ) -> ApplicationResult<bool> {
        let result = sqlx::query(
            "INSERT INTO notification_deliveries (event_id, reader_id, claimed_at)
             VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(event_id)
        .bind(i64::from(reader_id))
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    async fn release(&self, event_id: Uuid, reader_id: UserId) -> ApplicationResult<()> {
        sqlx::query("DELETE FROM notification_deliveries WHERE event_id = $1 AND reader_id = $2")
            .bind(event_id)
            .bind(i64::from(reader_id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
