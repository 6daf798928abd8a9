// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleContent, ArticleSummary, ArticleTitle, NewArticle},
        authorization::{Action, Resource},
    },
};

pub struct CreateArticleCommand {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub publisher_id: Option<i64>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    content: Option<String>,
    summary: Option<String>,
    publisher_id: Option<i64>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn publisher_id(mut self, publisher_id: i64) -> Self {
        self.publisher_id = Some(publisher_id);
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            content: self.content.ok_or("content is required")?,
            summary: self.summary.unwrap_or_default(),
            publisher_id: self.publisher_id,
        })
    }
}

impl ArticleCommandService {
    /// New articles always start out pending review.
    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_allowed(actor, Action::Create, Resource::NewArticle, "articles")?;

        let title = ArticleTitle::new(command.title)?;
        let content = ArticleContent::new(command.content)?;
        let summary = ArticleSummary::new(command.summary)?;
        let publisher_id = self.resolve_publisher(actor, command.publisher_id).await?;

        let created = self
            .write_repo
            .insert(NewArticle {
                title,
                content,
                summary,
                author_id: actor.id,
                publisher_id,
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(article_id = %created.id, author_id = %actor.id, "article submitted");
        Ok(created.into())
    }
}
