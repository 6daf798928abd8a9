use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::newsletter::NewsletterId;
use crate::domain::publisher::PublisherId;
use crate::domain::subscription::{ReaderSubscriptions, SubscriptionRepository, SubscriptionTarget};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `(table, target column, target id)` for one edge kind.
fn edge(target: SubscriptionTarget) -> (&'static str, &'static str, i64) {
    match target {
        SubscriptionTarget::Publisher(id) => {
            ("reader_publisher_subscriptions", "publisher_id", id.into())
        }
        SubscriptionTarget::Journalist(id) => {
            ("reader_journalist_subscriptions", "journalist_id", id.into())
        }
        SubscriptionTarget::Newsletter(id) => {
            ("reader_newsletter_subscriptions", "newsletter_id", id.into())
        }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn add(&self, reader_id: UserId, target: SubscriptionTarget) -> DomainResult<bool> {
        let (table, column, target_id) = edge(target);
        let result = sqlx::query(&format!(
            "INSERT INTO {table} (reader_id, {column}) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        ))
        .bind(i64::from(reader_id))
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, reader_id: UserId, target: SubscriptionTarget) -> DomainResult<bool> {
        let (table, column, target_id) = edge(target);
        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE reader_id = $1 AND {column} = $2"
        ))
        .bind(i64::from(reader_id))
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_for_reader(&self, reader_id: UserId) -> DomainResult<ReaderSubscriptions> {
        let publishers = sqlx::query_scalar::<_, i64>(
            "SELECT publisher_id FROM reader_publisher_subscriptions WHERE reader_id = $1 ORDER BY publisher_id",
        )
        .bind(i64::from(reader_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let journalists = sqlx::query_scalar::<_, i64>(
            "SELECT journalist_id FROM reader_journalist_subscriptions WHERE reader_id = $1 ORDER BY journalist_id",
        )
        .bind(i64::from(reader_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let newsletters = sqlx::query_scalar::<_, i64>(
            "SELECT newsletter_id FROM reader_newsletter_subscriptions WHERE reader_id = $1 ORDER BY newsletter_id",
        )
        .bind(i64::from(reader_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(ReaderSubscriptions {
            publishers: publishers
                .into_iter()
                .map(PublisherId::new)
                .collect::<DomainResult<_>>()?,
            journalists: journalists
                .into_iter()
                .map(UserId::new)
                .collect::<DomainResult<_>>()?,
            newsletters: newsletters
                .into_iter()
                .map(NewsletterId::new)
                .collect::<DomainResult<_>>()?,
        })
    }

    async fn subscribers_of(&self, target: SubscriptionTarget) -> DomainResult<Vec<UserId>> {
        let (table, column, target_id) = edge(target);
        let readers = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT reader_id FROM {table} WHERE {column} = $1 ORDER BY reader_id"
        ))
        .bind(target_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        readers.into_iter().map(UserId::new).collect()
    }
}
