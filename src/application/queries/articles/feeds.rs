use super::ArticleQueryService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{ArticleDto, AuthenticatedUser, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleFeedQuery, ArticleListQuery, ArticleVisibility},
        authorization::{Action, Resource},
        publisher::PublisherId,
        user::UserId,
    },
};

pub struct SubscriptionFeedQuery {
    pub limit: u32,
    pub cursor: Option<String>,
}

pub struct PublisherArticlesQuery {
    pub publisher_id: i64,
    pub limit: u32,
    pub cursor: Option<String>,
}

pub struct JournalistArticlesQuery {
    pub journalist_id: i64,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ArticleQueryService {
    /// Approved articles from everything the reader follows, newest
    /// publication first.
    pub async fn subscription_feed(
        &self,
        actor: &AuthenticatedUser,
        query: SubscriptionFeedQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        ensure_allowed(
            actor,
            Action::ManageSubscriptions,
            Resource::Subscriptions(actor.id),
            "a subscription feed",
        )?;

        let limit = Self::normalize_limit(query.limit);
        let cursor = Self::decode_cursor(query.cursor.as_deref())?;
        let follows = self.subscription_repo.list_for_reader(actor.id).await?;
        if follows.is_empty() {
            return Ok(Self::paginate(Vec::new(), limit, |a| a.created_at));
        }

        let records = self
            .read_repo
            .feed(ArticleFeedQuery {
                publisher_ids: follows.publishers,
                author_ids: follows.journalists,
                cursor,
                limit: limit + 1,
            })
            .await?;
        Ok(Self::paginate(records, limit, |a| {
            a.published_at().unwrap_or(a.created_at)
        }))
    }

    pub async fn publisher_articles(
        &self,
        query: PublisherArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let publisher_id = PublisherId::new(query.publisher_id)?;
        if self.publisher_repo.find_by_id(publisher_id).await?.is_none() {
            return Err(ApplicationError::not_found("publisher not found"));
        }

        let limit = Self::normalize_limit(query.limit);
        let mut listing = ArticleListQuery::new(ArticleVisibility::ApprovedOnly, limit + 1);
        listing.publisher_id = Some(publisher_id);
        listing.cursor = Self::decode_cursor(query.cursor.as_deref())?;

        let records = self.read_repo.list(listing).await?;
        Ok(Self::paginate(records, limit, |a| a.created_at))
    }

    pub async fn journalist_articles(
        &self,
        query: JournalistArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let journalist_id = UserId::new(query.journalist_id)?;
        match self.user_repo.find_by_id(journalist_id).await? {
            Some(user) if user.is_journalist() => {}
            _ => return Err(ApplicationError::not_found("journalist not found")),
        }

        let limit = Self::normalize_limit(query.limit);
        let mut listing = ArticleListQuery::new(ArticleVisibility::ApprovedOnly, limit + 1);
        listing.author_id = Some(journalist_id);
        listing.cursor = Self::decode_cursor(query.cursor.as_deref())?;

        let records = self.read_repo.list(listing).await?;
        Ok(Self::paginate(records, limit, |a| a.created_at))
    }
}
