use crate::domain::article::cursor::ArticleCursor;
use crate::domain::article::entity::{Article, ArticleTransition, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleStatus};
use crate::domain::errors::DomainResult;
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Which articles a listing may return at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleVisibility {
    All,
    ApprovedOrAuthoredBy(UserId),
    ApprovedOnly,
}

#[derive(Debug, Clone)]
pub struct ArticleListQuery {
    pub visibility: ArticleVisibility,
    pub status: Option<ArticleStatus>,
    pub publisher_id: Option<PublisherId>,
    pub author_id: Option<UserId>,
    pub cursor: Option<ArticleCursor>,
    pub limit: u32,
}

impl ArticleListQuery {
    pub const fn new(visibility: ArticleVisibility, limit: u32) -> Self {
        Self {
            visibility,
            status: None,
            publisher_id: None,
            author_id: None,
            cursor: None,
            limit,
        }
    }
}

/// Approved articles from followed publishers or authors, newest
/// publication first.
#[derive(Debug, Clone)]
pub struct ArticleFeedQuery {
    pub publisher_ids: Vec<PublisherId>,
    pub author_ids: Vec<UserId>,
    pub cursor: Option<ArticleCursor>,
    pub limit: u32,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Content edit guarded by `original_updated_at`; `Conflict` when stale.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
    /// Atomic check-and-set on the status column. `NotFound` when the row is
    /// gone, `InvalidState` when its status no longer equals `expected`.
    async fn transition(&self, transition: ArticleTransition) -> DomainResult<Article>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    /// Ordered by `(created_at DESC, id DESC)`, at most `limit` rows.
    async fn list(&self, query: ArticleListQuery) -> DomainResult<Vec<Article>>;
    /// Ordered by `(published_at DESC, id DESC)`, at most `limit` rows.
    async fn feed(&self, query: ArticleFeedQuery) -> DomainResult<Vec<Article>>;
}
