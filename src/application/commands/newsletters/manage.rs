use super::NewsletterCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{AuthenticatedUser, NewsletterDto},
        error::ApplicationResult,
    },
    domain::{
        authorization::{Action, Resource},
        newsletter::{NewNewsletter, NewsletterContent, NewsletterTitle, NewsletterUpdate},
    },
};

pub struct CreateNewsletterCommand {
    pub title: String,
    pub content: String,
    pub publisher_id: Option<i64>,
}

pub struct UpdateNewsletterCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub publisher_id: Option<Option<i64>>,
}

pub struct DeleteNewsletterCommand {
    pub id: i64,
}

impl NewsletterCommandService {
    pub async fn create_newsletter(
        &self,
        actor: &AuthenticatedUser,
        command: CreateNewsletterCommand,
    ) -> ApplicationResult<NewsletterDto> {
        ensure_allowed(actor, Action::Create, Resource::NewNewsletter, "newsletters")?;

        let title = NewsletterTitle::new(command.title)?;
        let content = NewsletterContent::new(command.content)?;
        let publisher_id = self.resolve_publisher(actor, command.publisher_id).await?;

        let created = self
            .repo
            .insert(NewNewsletter {
                title,
                content,
                author_id: actor.id,
                publisher_id,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(newsletter_id = %created.id, author_id = %actor.id, "newsletter published");
        Ok(created.into())
    }

    pub async fn update_newsletter(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateNewsletterCommand,
    ) -> ApplicationResult<NewsletterDto> {
        let newsletter = self.load_newsletter(command.id).await?;
        ensure_allowed(
            actor,
            Action::Update,
            Resource::Newsletter(&newsletter),
            "this newsletter",
        )?;

        let mut update = NewsletterUpdate::new(newsletter.id, newsletter.updated_at);
        if let Some(title) = command.title {
            update = update.with_title(NewsletterTitle::new(title)?);
        }
        if let Some(content) = command.content {
            update = update.with_content(NewsletterContent::new(content)?);
        }
        if let Some(publisher_id) = command.publisher_id {
            update = update.with_publisher(self.resolve_publisher(actor, publisher_id).await?);
        }
        if update.is_empty() {
            return Ok(newsletter.into());
        }

        update.updated_at = self.clock.now();
        Ok(self.repo.update(update).await?.into())
    }

    pub async fn delete_newsletter(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteNewsletterCommand,
    ) -> ApplicationResult<()> {
        let newsletter = self.load_newsletter(command.id).await?;
        ensure_allowed(
            actor,
            Action::Delete,
            Resource::Newsletter(&newsletter),
            "this newsletter",
        )?;
        self.repo.delete(newsletter.id).await?;
        Ok(())
    }
}
