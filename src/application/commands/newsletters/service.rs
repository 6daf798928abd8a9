use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        newsletter::{Newsletter, NewsletterId, NewsletterRepository},
        publisher::{PublisherId, PublisherRepository},
        user::Role,
    },
};

pub struct NewsletterCommandService {
    pub(super) repo: Arc<dyn NewsletterRepository>,
    pub(super) publisher_repo: Arc<dyn PublisherRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl NewsletterCommandService {
    pub fn new(
        repo: Arc<dyn NewsletterRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            publisher_repo,
            clock,
        }
    }

    pub(super) async fn load_newsletter(&self, id: i64) -> ApplicationResult<Newsletter> {
        let id = NewsletterId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("newsletter not found"))
    }

    /// A journalist may only file newsletters under publishers they write for.
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
