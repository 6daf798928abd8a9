use super::ArticleQueryService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{ArticleDto, AuthenticatedUser, CursorPage},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleListQuery, ArticleStatus, ArticleVisibility},
        authorization::{Action, Resource},
        publisher::PublisherId,
        user::UserId,
    },
};

#[derive(Debug, Default)]
pub struct ListArticlesQuery {
    pub status: Option<ArticleStatus>,
    pub publisher_id: Option<i64>,
    pub author_id: Option<i64>,
    pub limit: u32,
    pub cursor: Option<String>,
}

#[derive(Debug, Default)]
pub struct ListPendingArticlesQuery {
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ArticleQueryService {
    /// Filters never widen what the caller may see: a reader asking for
    /// pending articles gets an empty page.
    pub async fn list_articles(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let limit = Self::normalize_limit(query.limit);
        let mut listing = ArticleListQuery::new(visibility_for(actor), limit + 1);
        listing.status = query.status;
        listing.publisher_id = query.publisher_id.map(PublisherId::new).transpose()?;
        listing.author_id = query.author_id.map(UserId::new).transpose()?;
        listing.cursor = Self::decode_cursor(query.cursor.as_deref())?;

        let records = self.read_repo.list(listing).await?;
        Ok(Self::paginate(records, limit, |a| a.created_at))
    }

    /// The editorial review queue.
    pub async fn list_pending_articles(
        &self,
        actor: &AuthenticatedUser,
        query: ListPendingArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        ensure_allowed(actor, Action::Read, Resource::PendingArticles, "the review queue")?;

        let limit = Self::normalize_limit(query.limit);
        let mut listing = ArticleListQuery::new(ArticleVisibility::All, limit + 1);
        listing.status = Some(ArticleStatus::Pending);
        listing.cursor = Self::decode_cursor(query.cursor.as_deref())?;

        let records = self.read_repo.list(listing).await?;
        Ok(Self::paginate(records, limit, |a| a.created_at))
    }
}

fn visibility_for(actor: Option<&AuthenticatedUser>) -> ArticleVisibility {
    match actor {
        Some(actor) if actor.role.grants("articles", "read:any") => ArticleVisibility::All,
        Some(actor) if actor.role.grants("articles", "read:own") => {
            ArticleVisibility::ApprovedOrAuthoredBy(actor.id)
        }
        _ => ArticleVisibility::ApprovedOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use chrono::Utc;

    fn actor(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(7).unwrap(),
            username: "someone".into(),
            role,
            issued_at: Utc::now(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn visibility_follows_role_capabilities() {
        let me = UserId::new(7).unwrap();
        assert_eq!(visibility_for(None), ArticleVisibility::ApprovedOnly);
        assert_eq!(visibility_for(Some(&actor(Role::Editor))), ArticleVisibility::All);
        assert_eq!(
            visibility_for(Some(&actor(Role::Journalist))),
            ArticleVisibility::ApprovedOrAuthoredBy(me)
        );
        assert_eq!(
            visibility_for(Some(&actor(Role::Reader))),
            ArticleVisibility::ApprovedOnly
        );
        assert_eq!(
            visibility_for(Some(&actor(Role::Publisher))),
            ArticleVisibility::ApprovedOnly
        );
    }
}
