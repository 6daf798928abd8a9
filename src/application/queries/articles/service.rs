use std::sync::Arc;

use crate::{
    application::{
        dto::{ArticleDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{Article, ArticleCursor, ArticleReadRepository},
        errors::DomainError,
        publisher::PublisherRepository,
        subscription::SubscriptionRepository,
        user::UserRepository,
    },
};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) publisher_repo: Arc<dyn PublisherRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) subscription_repo: Arc<dyn SubscriptionRepository>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
        user_repo: Arc<dyn UserRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            read_repo,
            publisher_repo,
            user_repo,
            subscription_repo,
        }
    }

    pub(super) const fn normalize_limit(limit: u32) -> u32 {
        if limit == 0 {
            DEFAULT_LIMIT
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        }
    }

    pub(super) fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<ArticleCursor>> {
        match token {
            Some(value) => match ArticleCursor::decode(value) {
                Ok(cursor) => Ok(Some(cursor)),
                Err(DomainError::Validation(msg)) => Err(ApplicationError::validation(msg)),
                Err(other) => Err(ApplicationError::from(other)),
            },
            None => Ok(None),
        }
    }

    /// `records` holds up to `limit + 1` rows; the extra row only signals
    /// that another page exists.
    pub(super) fn paginate(
        mut records: Vec<Article>,
        limit: u32,
        sort_key: impl Fn(&Article) -> chrono::DateTime<chrono::Utc>,
    ) -> CursorPage<ArticleDto> {
        let limit = limit as usize;
        let next_cursor = if records.len() > limit {
            records.truncate(limit);
            records
                .last()
                .map(|last| ArticleCursor::new(sort_key(last), last.id.into()).encode())
        } else {
            None
        };
        CursorPage::new(records.into_iter().map(Into::into).collect(), next_cursor)
    }
}
