use super::ArticleCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleContent, ArticleSummary, ArticleTitle, ArticleUpdate},
        authorization::{Action, Resource},
    },
};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    /// `Some(None)` detaches the article from its publisher.
    pub publisher_id: Option<Option<i64>>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let article = self.load_article(command.id).await?;
        ensure_allowed(actor, Action::Update, Resource::Article(&article), "this article")?;

        let mut update = ArticleUpdate::new(article.id, article.updated_at);
        if let Some(title) = command.title {
            update = update.with_title(ArticleTitle::new(title)?);
        }
        if let Some(content) = command.content {
            update = update.with_content(ArticleContent::new(content)?);
        }
        if let Some(summary) = command.summary {
            update = update.with_summary(ArticleSummary::new(summary)?);
        }
        if let Some(publisher_id) = command.publisher_id {
            update = update.with_publisher(self.resolve_publisher(actor, publisher_id).await?);
        }

        if update.is_empty() {
            return Ok(article.into());
        }

        update.set_updated_at(self.clock.now());
        let updated = self.write_repo.update(update).await?;
        Ok(updated.into())
    }
}
