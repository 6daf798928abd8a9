// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        ports::{events::ArticleEventConsumer, time::Clock},
    },
    domain::{
        article::{Article, ArticleId, ArticleReadRepository, ArticleWriteRepository},
        publisher::{PublisherId, PublisherRepository},
        user::Role,
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) publisher_repo: Arc<dyn PublisherRepository>,
    pub(super) events: Arc<dyn ArticleEventConsumer>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
        events: Arc<dyn ArticleEventConsumer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            publisher_repo,
            events,
            clock,
        }
    }

    pub(super) async fn load_article(&self, id: i64) -> ApplicationResult<Article> {
        let id = ArticleId::new(id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }

    /// Journalists may only file under publishers they write for; editors
    /// may attach any existing publisher.
    pub(super) async fn resolve_publisher(
        &self,
        actor: &AuthenticatedUser,
        publisher_id: Option<i64>,
    ) -> ApplicationResult<Option<PublisherId>> {
        let Some(raw) = publisher_id else {
            return Ok(None);
        };
        let id = PublisherId::new(raw)?;
        let publisher = self
            .publisher_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("publisher not found"))?;
        if actor.role == Role::Journalist && !publisher.has_journalist(actor.id) {
            return Err(ApplicationError::validation(format!(
                "you are not a journalist of publisher {id}"
            )));
        }
        Ok(Some(id))
    }
}
