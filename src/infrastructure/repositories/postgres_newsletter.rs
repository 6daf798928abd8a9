use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::newsletter::{
    NewNewsletter, Newsletter, NewsletterContent, NewsletterFilter, NewsletterId,
    NewsletterRepository, NewsletterTitle, NewsletterUpdate,
};
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const NEWSLETTER_COLUMNS: &str =
    "id, title, content, author_id, publisher_id, published_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresNewsletterRepository {
    pool: PgPool,
}

impl PostgresNewsletterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NewsletterRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    publisher_id: Option<i64>,
    published_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NewsletterRow> for Newsletter {
    type Error = DomainError;

    fn try_from(row: NewsletterRow) -> Result<Self, Self::Error> {
        Ok(Newsletter {
            id: NewsletterId::new(row.id)?,
            title: NewsletterTitle::new(row.title)?,
            content: NewsletterContent::new(row.content)?,
            author_id: UserId::new(row.author_id)?,
            publisher_id: row.publisher_id.map(PublisherId::new).transpose()?,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl NewsletterRepository for PostgresNewsletterRepository {
    async fn insert(&self, newsletter: NewNewsletter) -> DomainResult<Newsletter> {
        let row = sqlx::query_as::<_, NewsletterRow>(&format!(
            "INSERT INTO newsletters (title, content, author_id, publisher_id, published_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5, $5)
             RETURNING {NEWSLETTER_COLUMNS}"
        ))
        .bind(newsletter.title.as_str())
        .bind(newsletter.content.as_str())
        .bind(i64::from(newsletter.author_id))
        .bind(newsletter.publisher_id.map(i64::from))
        .bind(newsletter.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Newsletter::try_from(row)
    }

    async fn update(&self, update: NewsletterUpdate) -> DomainResult<Newsletter> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE newsletters SET updated_at = ");
        builder.push_bind(update.updated_at);
        if let Some(title) = update.title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(content) = update.content {
            builder.push(", content = ");
            builder.push_bind(String::from(content));
        }
        if let Some(publisher_id) = update.publisher_id {
            builder.push(", publisher_id = ");
            builder.push_bind(publisher_id.map(i64::from));
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" AND updated_at = ");
        builder.push_bind(update.original_updated_at);
        builder.push(" RETURNING ");
        builder.push(NEWSLETTER_COLUMNS);

        let row = builder
            .build_query_as::<NewsletterRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| {
                DomainError::Conflict("newsletter update conflict, please retry".into())
            })?;

        Newsletter::try_from(row)
    }

    async fn delete(&self, id: NewsletterId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM newsletters WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("newsletter not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: NewsletterId) -> DomainResult<Option<Newsletter>> {
        let row = sqlx::query_as::<_, NewsletterRow>(&format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletters WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Newsletter::try_from).transpose()
    }

    async fn find_many(&self, ids: &[NewsletterId]) -> DomainResult<Vec<Newsletter>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let rows = sqlx::query_as::<_, NewsletterRow>(&format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletters WHERE id = ANY($1) ORDER BY published_at DESC, id DESC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Newsletter::try_from).collect()
    }

    async fn list(&self, filter: NewsletterFilter) -> DomainResult<Vec<Newsletter>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {NEWSLETTER_COLUMNS} FROM newsletters WHERE TRUE"
        ));
        if let Some(publisher_id) = filter.publisher_id {
            builder.push(" AND publisher_id = ");
            builder.push_bind(i64::from(publisher_id));
        }
        if let Some(author_id) = filter.author_id {
            builder.push(" AND author_id = ");
            builder.push_bind(i64::from(author_id));
        }
        builder.push(" ORDER BY published_at DESC, id DESC");

        let rows = builder
            .build_query_as::<NewsletterRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Newsletter::try_from).collect()
    }
}
