// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleContent, ArticleCursor, ArticleFeedQuery, ArticleId, ArticleListQuery,
    ArticleReadRepository, ArticleStatus, ArticleSummary, ArticleTitle, ArticleTransition,
    ArticleUpdate, ArticleVisibility, ArticleWriteRepository, NewArticle, Review,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, content, summary, author_id, publisher_id, status, \
     approved_by, published_at, rejected_by, rejection_reason, rejected_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    summary: String,
    author_id: i64,
    publisher_id: Option<i64>,
    status: String,
    approved_by: Option<i64>,
    published_at: Option<DateTime<Utc>>,
    rejected_by: Option<i64>,
    rejection_reason: Option<String>,
    rejected_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let review = Review::from_parts(
            row.status.parse::<ArticleStatus>()?,
            row.approved_by.map(UserId::new).transpose()?,
            row.published_at,
            row.rejected_by.map(UserId::new).transpose()?,
            row.rejection_reason,
            row.rejected_at,
        )?;
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            content: ArticleContent::new(row.content)?,
            summary: ArticleSummary::new(row.summary)?,
            author_id: UserId::new(row.author_id)?,
            publisher_id: row.publisher_id.map(PublisherId::new).transpose()?,
            review,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Flattened review columns in table order.
struct ReviewColumns {
    approved_by: Option<i64>,
    published_at: Option<DateTime<Utc>>,
    rejected_by: Option<i64>,
    rejection_reason: Option<String>,
    rejected_at: Option<DateTime<Utc>>,
}

impl From<Review> for ReviewColumns {
    fn from(review: Review) -> Self {
        match review {
            Review::Pending => Self {
                approved_by: None,
                published_at: None,
                rejected_by: None,
                rejection_reason: None,
                rejected_at: None,
            },
            Review::Approved {
                editor,
                published_at,
            } => Self {
                approved_by: Some(editor.into()),
                published_at: Some(published_at),
                rejected_by: None,
                rejection_reason: None,
                rejected_at: None,
            },
            Review::Rejected {
                editor,
                reason,
                rejected_at,
            } => Self {
                approved_by: None,
                published_at: None,
                rejected_by: Some(editor.into()),
                rejection_reason: reason,
                rejected_at: Some(rejected_at),
            },
        }
    }
}

impl PostgresArticleWriteRepository {
    /// Distinguishes a vanished row from a lost status race.
    async fn explain_missed_transition(
        &self,
        id: ArticleId,
        expected: ArticleStatus,
    ) -> DomainError {
        let current = sqlx::query_scalar::<_, String>("SELECT status FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await;
        match current {
            Ok(None) => DomainError::NotFound("article not found".into()),
            Ok(Some(status)) => DomainError::InvalidState(format!(
                "article {id} is {status}, expected {expected}"
            )),
            Err(err) => map_sqlx(err),
        }
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            content,
            summary,
            author_id,
            publisher_id,
            created_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, content, summary, author_id, publisher_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, 'pending', $6, $6)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(content.as_str())
        .bind(summary.as_str())
        .bind(i64::from(author_id))
        .bind(publisher_id.map(i64::from))
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            content,
            summary,
            publisher_id,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(String::from(content));
        }
        if let Some(summary) = summary {
            builder.push(", summary = ");
            builder.push_bind(String::from(summary));
        }
        if let Some(publisher_id) = publisher_id {
            builder.push(", publisher_id = ");
            builder.push_bind(publisher_id.map(i64::from));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn transition(&self, transition: ArticleTransition) -> DomainResult<Article> {
        let ArticleTransition {
            id,
            expected,
            review,
            updated_at,
        } = transition;
        let status = review.status();
        let columns = ReviewColumns::from(review);

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles
             SET status = $1, approved_by = $2, published_at = $3,
                 rejected_by = $4, rejection_reason = $5, rejected_at = $6, updated_at = $7
             WHERE id = $8 AND status = $9
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(columns.approved_by)
        .bind(columns.published_at)
        .bind(columns.rejected_by)
        .bind(columns.rejection_reason)
        .bind(columns.rejected_at)
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Article::try_from(row),
            None => Err(self.explain_missed_transition(id, expected).await),
        }
    }
}

impl PostgresArticleReadRepository {
    fn push_visibility(builder: &mut QueryBuilder<'_, Postgres>, visibility: ArticleVisibility) {
        match visibility {
            ArticleVisibility::All => {
                builder.push("TRUE");
            }
            ArticleVisibility::ApprovedOnly => {
                builder.push("status = 'approved'");
            }
            ArticleVisibility::ApprovedOrAuthoredBy(user_id) => {
                builder.push("(status = 'approved' OR author_id = ");
                builder.push_bind(i64::from(user_id));
                builder.push(")");
            }
        }
    }

    fn push_cursor(builder: &mut QueryBuilder<'_, Postgres>, column: &str, cursor: ArticleCursor) {
        builder.push(" AND (");
        builder.push(column);
        builder.push(", id) < (");
        builder.push_bind(cursor.sort_at);
        builder.push(", ");
        builder.push_bind(cursor.id);
        builder.push(")");
    }

    async fn fetch(&self, mut builder: QueryBuilder<'_, Postgres>) -> DomainResult<Vec<Article>> {
        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Article::try_from).collect()
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(&self, query: ArticleListQuery) -> DomainResult<Vec<Article>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE "));
        Self::push_visibility(&mut builder, query.visibility);

        if let Some(status) = query.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(publisher_id) = query.publisher_id {
            builder.push(" AND publisher_id = ");
            builder.push_bind(i64::from(publisher_id));
        }
        if let Some(author_id) = query.author_id {
            builder.push(" AND author_id = ");
            builder.push_bind(i64::from(author_id));
        }
        if let Some(cursor) = query.cursor {
            Self::push_cursor(&mut builder, "created_at", cursor);
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(query.limit));
        self.fetch(builder).await
    }

    async fn feed(&self, query: ArticleFeedQuery) -> DomainResult<Vec<Article>> {
        let publisher_ids: Vec<i64> = query.publisher_ids.into_iter().map(i64::from).collect();
        let author_ids: Vec<i64> = query.author_ids.into_iter().map(i64::from).collect();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE status = 'approved' AND (publisher_id = ANY("
        ));
        builder.push_bind(publisher_ids);
        builder.push(") OR author_id = ANY(");
        builder.push_bind(author_ids);
        builder.push("))");
        if let Some(cursor) = query.cursor {
            Self::push_cursor(&mut builder, "published_at", cursor);
        }

        builder.push(" ORDER BY published_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(query.limit));
        self.fetch(builder).await
    }
}
