use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::{
    JoinRequestId, JoinRequestRepository, JoinRequestReview, JoinRequestStatus, MemberKind,
    NewJoinRequest, NewPublisher, Publisher, PublisherId, PublisherJoinRequest, PublisherName,
    PublisherRepository, PublisherUpdate, Website,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use std::collections::{BTreeSet, HashMap};

const PUBLISHER_COLUMNS: &str =
    "id, name, description, website, established_date, owner_id, created_at, updated_at";
const JOIN_REQUEST_COLUMNS: &str =
    "id, requester_id, publisher_id, status, message, reviewed_by, reviewed_at, created_at";

#[derive(Clone)]
pub struct PostgresPublisherRepository {
    pool: PgPool,
}

impl PostgresPublisherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresJoinRequestRepository {
    pool: PgPool,
}

impl PostgresJoinRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PublisherRow {
    id: i64,
    name: String,
    description: String,
    website: Option<String>,
    established_date: Option<NaiveDate>,
    owner_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct MemberRow {
    publisher_id: i64,
    user_id: i64,
    kind: String,
}

#[derive(Default)]
struct Members {
    editors: BTreeSet<UserId>,
    journalists: BTreeSet<UserId>,
}

fn build_publisher(row: PublisherRow, members: Members) -> DomainResult<Publisher> {
    Ok(Publisher {
        id: PublisherId::new(row.id)?,
        name: PublisherName::new(row.name)?,
        description: row.description,
        website: match row.website {
            Some(raw) => Website::parse(raw)?,
            None => None,
        },
        established_date: row.established_date,
        owner_id: row.owner_id.map(UserId::new).transpose()?,
        editors: members.editors,
        journalists: members.journalists,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Join table backing each member list.
const fn member_table(kind: MemberKind) -> &'static str {
    match kind {
        MemberKind::Editor => "publisher_editors",
        MemberKind::Journalist => "publisher_journalists",
    }
}

async fn insert_member(
    tx: &mut Transaction<'_, Postgres>,
    publisher_id: i64,
    user_id: i64,
    kind: MemberKind,
) -> DomainResult<()> {
    sqlx::query(&format!(
        "INSERT INTO {} (publisher_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        member_table(kind)
    ))
    .bind(publisher_id)
    .bind(user_id)
    .execute(&mut **tx)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

impl PostgresPublisherRepository {
    async fn with_members(&self, rows: Vec<PublisherRow>) -> DomainResult<Vec<Publisher>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let member_rows = sqlx::query_as::<_, MemberRow>(
            "SELECT publisher_id, user_id, 'editor' AS kind FROM publisher_editors WHERE publisher_id = ANY($1)
             UNION ALL
             SELECT publisher_id, user_id, 'journalist' AS kind FROM publisher_journalists WHERE publisher_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut members: HashMap<i64, Members> = HashMap::new();
        for member in member_rows {
            let entry = members.entry(member.publisher_id).or_default();
            let user_id = UserId::new(member.user_id)?;
            if member.kind == MemberKind::Editor.as_str() {
                entry.editors.insert(user_id);
            } else {
                entry.journalists.insert(user_id);
            }
        }

        rows.into_iter()
            .map(|row| {
                let row_members = members.remove(&row.id).unwrap_or_default();
                build_publisher(row, row_members)
            })
            .collect()
    }

    async fn fetch_one(&self, id: i64) -> DomainResult<Option<Publisher>> {
        let row = sqlx::query_as::<_, PublisherRow>(&format!(
            "SELECT {PUBLISHER_COLUMNS} FROM publishers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(self.with_members(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PublisherRepository for PostgresPublisherRepository {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher> {
        let NewPublisher {
            name,
            description,
            website,
            established_date,
            owner_id,
            created_at,
        } = publisher;

        let row = sqlx::query_as::<_, PublisherRow>(&format!(
            "INSERT INTO publishers (name, description, website, established_date, owner_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {PUBLISHER_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(description)
        .bind(website.map(String::from))
        .bind(established_date)
        .bind(i64::from(owner_id))
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        build_publisher(row, Members::default())
    }

    async fn update(&self, update: PublisherUpdate) -> DomainResult<Publisher> {
        let PublisherUpdate {
            id,
            name,
            description,
            website,
            established_date,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE publishers SET updated_at = ");
        builder.push_bind(updated_at);
        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description);
        }
        if let Some(website) = website {
            builder.push(", website = ");
            builder.push_bind(website.map(String::from));
        }
        if let Some(date) = established_date {
            builder.push(", established_date = ");
            builder.push_bind(date);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING id");

        let updated = builder
            .build_query_scalar::<i64>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("publisher not found".into()))?;

        self.fetch_one(updated)
            .await?
            .ok_or_else(|| DomainError::NotFound("publisher not found".into()))
    }

    async fn find_by_id(&self, id: PublisherId) -> DomainResult<Option<Publisher>> {
        self.fetch_one(id.into()).await
    }

    async fn find_many(&self, ids: &[PublisherId]) -> DomainResult<Vec<Publisher>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let rows = sqlx::query_as::<_, PublisherRow>(&format!(
            "SELECT {PUBLISHER_COLUMNS} FROM publishers WHERE id = ANY($1) ORDER BY name"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.with_members(rows).await
    }

    async fn list(&self) -> DomainResult<Vec<Publisher>> {
        let rows = sqlx::query_as::<_, PublisherRow>(&format!(
            "SELECT {PUBLISHER_COLUMNS} FROM publishers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.with_members(rows).await
    }

    async fn add_member(
        &self,
        id: PublisherId,
        user_id: UserId,
        kind: MemberKind,
    ) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        insert_member(&mut tx, id.into(), user_id.into(), kind).await?;
        tx.commit().await.map_err(map_sqlx)
    }
}

#[derive(Debug, FromRow)]
struct JoinRequestRow {
    id: i64,
    requester_id: i64,
    publisher_id: i64,
    status: String,
    message: Option<String>,
    reviewed_by: Option<i64>,
    reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<JoinRequestRow> for PublisherJoinRequest {
    type Error = DomainError;

    fn try_from(row: JoinRequestRow) -> Result<Self, Self::Error> {
        Ok(PublisherJoinRequest {
            id: JoinRequestId::new(row.id)?,
            requester_id: UserId::new(row.requester_id)?,
            publisher_id: PublisherId::new(row.publisher_id)?,
            status: row.status.parse::<JoinRequestStatus>()?,
            message: row.message,
            reviewed_by: row.reviewed_by.map(UserId::new).transpose()?,
            reviewed_at: row.reviewed_at,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl JoinRequestRepository for PostgresJoinRequestRepository {
    async fn insert(&self, request: NewJoinRequest) -> DomainResult<PublisherJoinRequest> {
        let row = sqlx::query_as::<_, JoinRequestRow>(&format!(
            "INSERT INTO publisher_join_requests (requester_id, publisher_id, status, message, created_at)
             VALUES ($1, $2, 'pending', $3, $4)
             RETURNING {JOIN_REQUEST_COLUMNS}"
        ))
        .bind(i64::from(request.requester_id))
        .bind(i64::from(request.publisher_id))
        .bind(request.message)
        .bind(request.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        PublisherJoinRequest::try_from(row)
    }

    async fn find_by_id(&self, id: JoinRequestId) -> DomainResult<Option<PublisherJoinRequest>> {
        let row = sqlx::query_as::<_, JoinRequestRow>(&format!(
            "SELECT {JOIN_REQUEST_COLUMNS} FROM publisher_join_requests WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PublisherJoinRequest::try_from).transpose()
    }

    async fn find_pending(
        &self,
        requester_id: UserId,
        publisher_id: PublisherId,
    ) -> DomainResult<Option<PublisherJoinRequest>> {
        let row = sqlx::query_as::<_, JoinRequestRow>(&format!(
            "SELECT {JOIN_REQUEST_COLUMNS} FROM publisher_join_requests
             WHERE requester_id = $1 AND publisher_id = $2 AND status = 'pending'"
        ))
        .bind(i64::from(requester_id))
        .bind(i64::from(publisher_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PublisherJoinRequest::try_from).transpose()
    }

    async fn list_for_publisher(
        &self,
        publisher_id: PublisherId,
        status: Option<JoinRequestStatus>,
    ) -> DomainResult<Vec<PublisherJoinRequest>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {JOIN_REQUEST_COLUMNS} FROM publisher_join_requests WHERE publisher_id = "
        ));
        builder.push_bind(i64::from(publisher_id));
        if let Some(status) = status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder
            .build_query_as::<JoinRequestRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(PublisherJoinRequest::try_from).collect()
    }

    async fn record_review(&self, review: JoinRequestReview) -> DomainResult<PublisherJoinRequest> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, JoinRequestRow>(&format!(
            "UPDATE publisher_join_requests
             SET status = $1, reviewed_by = $2, reviewed_at = $3
             WHERE id = $4 AND status = 'pending'
             RETURNING {JOIN_REQUEST_COLUMNS}"
        ))
        .bind(review.outcome.as_str())
        .bind(i64::from(review.reviewed_by))
        .bind(review.reviewed_at)
        .bind(i64::from(review.id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let Some(row) = row else {
            let exists = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM publisher_join_requests WHERE id = $1",
            )
            .bind(i64::from(review.id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
            return Err(match exists {
                Some(_) => DomainError::InvalidState("join request has already been reviewed".into()),
                None => DomainError::NotFound("join request not found".into()),
            });
        };

        if let Some(kind) = review.grant {
            insert_member(&mut tx, row.publisher_id, row.requester_id, kind).await?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        PublisherJoinRequest::try_from(row)
    }
}
