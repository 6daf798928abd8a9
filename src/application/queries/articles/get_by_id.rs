use super::ArticleQueryService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::ArticleId,
        authorization::{Action, Resource},
    },
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    /// Anonymous callers see approved articles only.
    pub async fn get_article_by_id(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        match actor {
            Some(actor) => {
                ensure_allowed(actor, Action::Read, Resource::Article(&article), "this article")?;
            }
            None if !article.is_approved() => {
                return Err(ApplicationError::forbidden(
                    "this article has not been published",
                ));
            }
            None => {}
        }
        Ok(article.into())
    }
}
