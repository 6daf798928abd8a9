// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::{authorization::ensure_allowed, dto::AuthenticatedUser, error::ApplicationResult},
    domain::authorization::{Action, Resource},
};

pub struct DeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn delete_article(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let article = self.load_article(command.id).await?;
        ensure_allowed(actor, Action::Delete, Resource::Article(&article), "this article")?;

        self.write_repo.delete(article.id).await?;
        tracing::info!(article_id = %article.id, actor_id = %actor.id, "article deleted");
        Ok(())
    }
}
