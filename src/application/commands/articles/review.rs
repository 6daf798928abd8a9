//! Editorial transitions. Each one is validated on the loaded article and
//! then written with a check-and-set on the stored status, so of two
//! concurrent reviewers only one succeeds.

use super::ArticleCommandService;
use crate::{
    application::{
        authorization::ensure_allowed,
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleApproved, ArticleStatus, ArticleTransition},
        authorization::{Action, Resource},
    },
};

pub struct ApproveArticleCommand {
    pub id: i64,
}

pub struct RejectArticleCommand {
    pub id: i64,
    pub reason: Option<String>,
}

pub struct ResubmitArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn approve_article(
        &self,
        actor: &AuthenticatedUser,
        command: ApproveArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_article(command.id).await?;
        ensure_allowed(actor, Action::Approve, Resource::Article(&article), "articles")?;

        let now = self.clock.now();
        article.approve(actor.id, now)?;
        let approved = self
            .write_repo
            .transition(ArticleTransition::from_article(&article, ArticleStatus::Pending))
            .await?;

        tracing::info!(article_id = %approved.id, editor_id = %actor.id, "article approved");

        let event = ArticleApproved::new(approved.clone(), actor.id, now);
        tracing::debug!(article_id = %approved.id, event_id = %event.event_id, "dispatching approval event");
        self.events.article_approved(event).await;

        Ok(approved.into())
    }

    pub async fn reject_article(
        &self,
        actor: &AuthenticatedUser,
        command: RejectArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_article(command.id).await?;
        ensure_allowed(actor, Action::Reject, Resource::Article(&article), "articles")?;

        article.reject(actor.id, command.reason, self.clock.now())?;
        let rejected = self
            .write_repo
            .transition(ArticleTransition::from_article(&article, ArticleStatus::Pending))
            .await?;

        tracing::info!(article_id = %rejected.id, editor_id = %actor.id, "article rejected");
        Ok(rejected.into())
    }

    /// Sends a rejected article back into the review queue.
    pub async fn resubmit_article(
        &self,
        actor: &AuthenticatedUser,
        command: ResubmitArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_article(command.id).await?;
        ensure_allowed(actor, Action::Resubmit, Resource::Article(&article), "this article")?;

        article.resubmit(self.clock.now())?;
        let pending = self
            .write_repo
            .transition(ArticleTransition::from_article(&article, ArticleStatus::Rejected))
            .await?;

        tracing::info!(article_id = %pending.id, author_id = %actor.id, "article resubmitted");
        Ok(pending.into())
    }
}
